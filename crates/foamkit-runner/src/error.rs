//! # Design
//!
//! - Translate `docker` CLI failures into a small, matchable taxonomy.
//! - Keep messages constant; the daemon's own output travels in `detail`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors raised while running commands in containers.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The command exited with a non-zero status inside the container.
    #[error("command failed with status code {status}")]
    CommandFailed {
        /// Exit status reported by `docker wait`.
        status: i64,
    },
    /// The requested image does not exist locally or in the registry.
    #[error("docker image not found")]
    ImageNotFound {
        /// Image reference that could not be resolved.
        image: String,
        /// Daemon output describing the failure.
        detail: String,
    },
    /// Any other failure reported by the Docker daemon or CLI.
    #[error("docker operation failed")]
    Docker {
        /// Docker subcommand that failed.
        operation: &'static str,
        /// Daemon output describing the failure.
        detail: String,
    },
    /// The case path is missing or not a directory.
    #[error("invalid case directory")]
    InvalidCase {
        /// Offending case path.
        path: PathBuf,
    },
    /// The command string was rejected before launch.
    #[error("invalid command")]
    InvalidCommand {
        /// Static reason for the rejection.
        reason: &'static str,
    },
    /// Spawning or talking to the `docker` process failed.
    #[error("docker process io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Container statistics were not valid JSON.
    #[error("container stats were not valid JSON")]
    Stats {
        /// Container the statistics were requested for.
        container_id: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl RunnerError {
    /// Whether the error stems from caller input rather than Docker itself.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidCase { .. } | Self::InvalidCommand { .. })
    }

    /// Human-readable detail including any daemon output.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::ImageNotFound { image, detail } => format!("{image}: {detail}"),
            Self::Docker { operation, detail } => format!("docker {operation}: {detail}"),
            Self::InvalidCase { path } => format!("{} is not a directory", path.display()),
            Self::InvalidCommand { reason } => (*reason).to_string(),
            Self::Io { operation, source } => format!("{operation}: {source}"),
            Self::Stats {
                container_id,
                source,
            } => format!("{container_id}: {source}"),
            Self::CommandFailed { .. } => self.to_string(),
        }
    }
}
