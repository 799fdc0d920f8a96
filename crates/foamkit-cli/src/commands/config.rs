use foamkit_config::FoamkitConfig;

use crate::cli::OutputFormat;
use crate::errors::CliResult;
use crate::output::render_config;

pub(crate) fn handle_config(config: &FoamkitConfig, format: OutputFormat) -> CliResult<()> {
    render_config(config, format)
}
