//! Per-file download outcomes.

use std::path::PathBuf;

use foamkit_config::MARKER_FILE;

/// Result of transferring one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The file was fetched and written.
    Downloaded {
        /// Number of bytes written.
        bytes: u64,
    },
    /// The file could not be fetched or written.
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

/// One `(path, outcome)` entry of a download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    /// Destination relative to the case directory.
    pub relative_path: PathBuf,
    /// URL that was requested.
    pub url: String,
    /// What happened.
    pub outcome: TransferOutcome,
}

impl TransferRecord {
    /// Whether the transfer failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.outcome, TransferOutcome::Failed { .. })
    }
}

pub(crate) fn summarize_failures(failures: &[TransferRecord]) -> String {
    let rendered: Vec<String> = failures
        .iter()
        .filter_map(|record| match &record.outcome {
            TransferOutcome::Failed { reason } => Some(format!("{}: {reason}", record.url)),
            TransferOutcome::Downloaded { .. } => None,
        })
        .collect();
    if rendered.is_empty() {
        format!("{MARKER_FILE} not found after download")
    } else {
        rendered.join("; ")
    }
}
