use foamkit_config::FoamkitConfig;
use foamkit_runner::FoamRunner;

use crate::cli::{RunArgs, StatsArgs};
use crate::errors::CliResult;
use crate::output::print_json;

pub(crate) fn handle_run(config: &FoamkitConfig, args: &RunArgs) -> CliResult<()> {
    let runner = FoamRunner::from_settings(config.docker.clone());
    runner.run(&args.case, &args.command, args.user.as_deref())?;
    Ok(())
}

pub(crate) fn handle_pull(config: &FoamkitConfig) -> CliResult<()> {
    FoamRunner::from_settings(config.docker.clone()).pull_image()?;
    Ok(())
}

pub(crate) fn handle_stats(config: &FoamkitConfig, args: &StatsArgs) -> CliResult<()> {
    let stats = FoamRunner::from_settings(config.docker.clone()).container_stats(&args.container_id)?;
    print_json(&stats)
}
