use anyhow::Context;
use foamkit_config::FoamkitConfig;
use foamkit_tutorial::TutorialAcquirer;

use crate::cli::{OutputFormat, TutorialArgs};
use crate::errors::{CliError, CliResult};
use crate::output::render_acquisition;

pub(crate) fn handle_tutorial(
    config: &FoamkitConfig,
    args: &TutorialArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let acquirer = TutorialAcquirer::from_settings(config.tutorial.clone())
        .context("failed to prepare tutorial acquisition")
        .map_err(CliError::failure)?;
    let acquisition = acquirer.acquire(&args.dir).map_err(CliError::failure)?;
    render_acquisition(&acquisition, format)
}
