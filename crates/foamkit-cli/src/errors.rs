//! CLI error type separating caller mistakes from operational failures.

use std::fmt::{self, Display, Formatter};

use foamkit_config::ConfigError;
use foamkit_runner::RunnerError;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidField { .. } => Self::validation(err.detail()),
            ConfigError::Io { .. } | ConfigError::Json { .. } => {
                Self::failure(anyhow::anyhow!("{}: {}", err, err.detail()))
            }
        }
    }
}

impl From<RunnerError> for CliError {
    fn from(err: RunnerError) -> Self {
        if err.is_validation() {
            Self::validation(err.detail())
        } else {
            Self::failure(anyhow::anyhow!(err.detail()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn exit_codes_distinguish_kinds() {
        assert_eq!(CliError::validation("bad").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow::anyhow!("boom")).exit_code(), 3);
    }

    #[test]
    fn invalid_config_field_is_a_validation_error() {
        let err = CliError::from(ConfigError::InvalidField {
            section: "docker",
            field: "image",
            value: Some(String::new()),
            reason: "must not be empty",
        });
        assert!(matches!(err, CliError::Validation(ref message) if message.contains("docker.image")));
    }

    #[test]
    fn runner_errors_map_by_kind() {
        let invalid = CliError::from(RunnerError::InvalidCase {
            path: PathBuf::from("/missing"),
        });
        let failed = CliError::from(RunnerError::CommandFailed { status: 2 });
        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(failed.exit_code(), 3);
        assert_eq!(failed.display_message(), "command failed with status code 2");
    }
}
