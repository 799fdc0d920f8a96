//! Error types for configuration operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Section that failed validation.
        section: &'static str,
        /// Field that failed validation.
        field: &'static str,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Reading the configuration file failed.
    #[error("configuration file could not be read")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The configuration file was not valid JSON for the document schema.
    #[error("configuration file is not valid")]
    Json {
        /// Path of the configuration file.
        path: PathBuf,
        /// Source JSON error.
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        section: &'static str,
        field: &'static str,
        value: Option<String>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidField {
            section,
            field,
            value,
            reason,
        }
    }

    /// Human-readable summary including the context fields.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidField {
                section,
                field,
                value,
                reason,
            } => value.as_ref().map_or_else(
                || format!("{section}.{field}: {reason}"),
                |value| format!("{section}.{field}: {reason} (got '{value}')"),
            ),
            Self::Io { path, source } => format!("{}: {source}", path.display()),
            Self::Json { path, source } => format!("{}: {source}", path.display()),
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_field_detail_includes_value() {
        let err = ConfigError::invalid("docker", "image", Some(" ".into()), "must not be empty");
        assert_eq!(err.to_string(), "invalid configuration field");
        assert_eq!(err.detail(), "docker.image: must not be empty (got ' ')");
        assert!(err.source().is_none());
    }

    #[test]
    fn io_error_preserves_source() {
        let err = ConfigError::Io {
            path: PathBuf::from("foamkit.json"),
            source: io::Error::other("denied"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.detail(), "foamkit.json: denied");
    }
}
