//! # Design
//!
//! - Structured errors for the acquisition pipeline with operation and path context.
//! - `Retrieval` is the only terminal error of the fallback chain; its message
//!   aggregates every failed transfer so callers see one reproducible summary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::transfer::{TransferRecord, summarize_failures};

/// Result type for tutorial acquisition.
pub type TutorialResult<T> = Result<T, TutorialError>;

/// Errors produced while acquiring a tutorial case.
#[derive(Debug, Error)]
pub enum TutorialError {
    /// Every tier was exhausted without producing the marker file.
    #[error("failed to download OpenFOAM tutorial: {}", summarize_failures(.failures))]
    Retrieval {
        /// Target directory of the request.
        target: PathBuf,
        /// Failed transfers, in manifest order.
        failures: Vec<TransferRecord>,
    },
    /// IO failures that abort the operation.
    #[error("tutorial io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Directory traversal failures while copying.
    #[error("tutorial walkdir failure")]
    Walkdir {
        /// Operation that triggered the traversal failure.
        operation: &'static str,
        /// Root of the traversal.
        path: PathBuf,
        /// Underlying walkdir error.
        source: walkdir::Error,
    },
    /// The HTTP client could not be constructed.
    #[error("tutorial http client could not be built")]
    Client {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
}

impl TutorialError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn walkdir(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: walkdir::Error,
    ) -> Self {
        Self::Walkdir {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Failed transfers when this is a retrieval error.
    #[must_use]
    pub fn failures(&self) -> &[TransferRecord] {
        match self {
            Self::Retrieval { failures, .. } => failures,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TransferOutcome;
    use std::error::Error;

    #[test]
    fn retrieval_message_lists_each_failed_url() {
        let err = TutorialError::Retrieval {
            target: PathBuf::from("cavity"),
            failures: vec![
                TransferRecord {
                    relative_path: PathBuf::from("system/controlDict"),
                    url: "http://origin.test/system/controlDict".to_string(),
                    outcome: TransferOutcome::Failed {
                        reason: "http status 404".to_string(),
                    },
                },
                TransferRecord {
                    relative_path: PathBuf::from("0/U"),
                    url: "http://origin.test/0/U".to_string(),
                    outcome: TransferOutcome::Failed {
                        reason: "connection refused".to_string(),
                    },
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "failed to download OpenFOAM tutorial: \
             http://origin.test/system/controlDict: http status 404; \
             http://origin.test/0/U: connection refused"
        );
        assert_eq!(err.failures().len(), 2);
    }

    #[test]
    fn retrieval_without_failures_names_missing_marker() {
        let err = TutorialError::Retrieval {
            target: PathBuf::from("cavity"),
            failures: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "failed to download OpenFOAM tutorial: system/controlDict not found after download"
        );
    }

    #[test]
    fn io_helper_preserves_source() {
        let err = TutorialError::io("create_dir", "cavity/system", io::Error::other("denied"));
        assert!(matches!(err, TutorialError::Io { operation: "create_dir", .. }));
        assert!(err.source().is_some());
        assert!(err.failures().is_empty());
    }
}
