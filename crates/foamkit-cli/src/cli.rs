//! Argument parsing, configuration layering, and command dispatch.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand, ValueEnum};
use foamkit_config::FoamkitConfig;
use foamkit_telemetry::{LogFormat, LoggingConfig, build_sha, init_logging};
use tracing::info;

use crate::commands::config::handle_config;
use crate::commands::runner::{handle_pull, handle_run, handle_stats};
use crate::commands::tutorial::handle_tutorial;
use crate::errors::{CliError, CliResult};

const GREETING: &str = "Hello from foamkit!";

/// Parses CLI arguments, executes the requested command, and reports failures.
/// Returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn execute(cli: Cli) -> CliResult<()> {
    let config = resolve_config(&cli)?;
    let format = LogFormat::from_name(&config.logging.format);
    init_logging(&LoggingConfig {
        level: &config.logging.level,
        format,
        build_sha: build_sha(),
    })
    .map_err(|err| CliError::failure(anyhow!("{err}")))?;
    dispatch(cli, &config)
}

pub(crate) fn dispatch(cli: Cli, config: &FoamkitConfig) -> CliResult<()> {
    match cli.command {
        None => {
            info!("{GREETING}");
            Ok(())
        }
        Some(Command::Tutorial(args)) => handle_tutorial(config, &args, cli.output),
        Some(Command::Run(args)) => handle_run(config, &args),
        Some(Command::Pull) => handle_pull(config),
        Some(Command::Stats(args)) => handle_stats(config, &args),
        Some(Command::Config) => handle_config(config, cli.output),
    }
}

/// Load file and environment layers, then apply command-line overrides.
pub(crate) fn resolve_config(cli: &Cli) -> CliResult<FoamkitConfig> {
    let mut config = foamkit_config::load(cli.config.as_deref())?;
    apply_overrides(cli, &mut config)?;
    Ok(config)
}

fn apply_overrides(cli: &Cli, config: &mut FoamkitConfig) -> CliResult<()> {
    if let Some(image) = &cli.image {
        let image = image.trim();
        if image.is_empty() || image.chars().any(char::is_whitespace) {
            return Err(CliError::validation(
                "--image must be a non-empty image reference without whitespace",
            ));
        }
        config.docker.image = image.to_string();
    }
    if let Some(level) = &cli.log_level {
        if level.trim().is_empty() {
            return Err(CliError::validation("--log-level must not be empty"));
        }
        config.logging.level = level.trim().to_string();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format.as_str().to_string();
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    name = "foamkit",
    about = "Acquire OpenFOAM tutorial cases and run them in Docker"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, env = "FOAMKIT_CONFIG", help = "JSON configuration file")]
    pub(crate) config: Option<PathBuf>,
    #[arg(long, global = true, help = "Docker image providing OpenFOAM")]
    pub(crate) image: Option<String>,
    #[arg(long, global = true, help = "Log level or filter directive")]
    pub(crate) log_level: Option<String>,
    #[arg(long, global = true, value_enum)]
    pub(crate) log_format: Option<LogFormatArg>,
    #[arg(
        long = "output",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Ensure a tutorial case exists in a directory.
    Tutorial(TutorialArgs),
    /// Run a command against a case inside a container.
    Run(RunArgs),
    /// Pull the configured image.
    Pull,
    /// Print resource statistics for a running container.
    Stats(StatsArgs),
    /// Print the effective configuration.
    Config,
}

#[derive(Args)]
pub(crate) struct TutorialArgs {
    #[arg(help = "Directory that should hold the case")]
    pub(crate) dir: PathBuf,
}

#[derive(Args)]
pub(crate) struct RunArgs {
    #[arg(help = "Case directory mounted into the container")]
    pub(crate) case: PathBuf,
    #[arg(help = "Shell command, e.g. blockMesh")]
    pub(crate) command: String,
    #[arg(long, help = "Container user as UID:GID (defaults to the caller)")]
    pub(crate) user: Option<String>,
}

#[derive(Args)]
pub(crate) struct StatsArgs {
    #[arg(help = "Container identifier")]
    pub(crate) container_id: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormatArg {
    Auto,
    Json,
    Pretty,
}

impl LogFormatArg {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}
