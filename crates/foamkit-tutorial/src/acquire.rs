//! Tutorial acquisition: local cache check, system copy, then network download.

use std::path::{Path, PathBuf};

use foamkit_config::{MARKER_FILE, REQUIRED_DIRS, TutorialSettings};
use tracing::{Dispatch, error, info, warn};

use crate::error::{TutorialError, TutorialResult};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::transfer::{TransferOutcome, TransferRecord};
use crate::tree::{CreatedPaths, copy_contents};

/// Which tier satisfied an acquisition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcquisitionSource {
    /// The target already held a complete case.
    Existing,
    /// The case was copied from the system installation.
    SystemCopy,
    /// The case was downloaded file by file.
    Download,
}

impl AcquisitionSource {
    /// Stable label for logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::SystemCopy => "system_copy",
            Self::Download => "download",
        }
    }
}

/// A satisfied tutorial request. The directory belongs to the caller.
#[derive(Debug, Clone)]
pub struct Acquisition {
    path: PathBuf,
    source: AcquisitionSource,
    transfers: Vec<TransferRecord>,
}

impl Acquisition {
    /// Directory containing the tutorial files.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tier that produced the case.
    #[must_use]
    pub const fn source(&self) -> AcquisitionSource {
        self.source
    }

    /// Per-file outcomes; empty unless the case was downloaded.
    #[must_use]
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }

    /// Consume the acquisition, yielding the case directory.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Ensures a tutorial case exists in a target directory using the cheapest source.
///
/// Concurrent calls against the same target directory are not coordinated.
#[derive(Debug)]
pub struct TutorialAcquirer<F = HttpFetcher> {
    settings: TutorialSettings,
    fetcher: F,
    dispatch: Option<Dispatch>,
}

impl TutorialAcquirer<HttpFetcher> {
    /// Acquirer that downloads over HTTP using the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_settings(settings: TutorialSettings) -> TutorialResult<Self> {
        let fetcher = HttpFetcher::new(settings.http_timeout())?;
        Ok(Self::new(settings, fetcher))
    }
}

impl<F: Fetcher> TutorialAcquirer<F> {
    /// Acquirer with an explicit transport.
    #[must_use]
    pub const fn new(settings: TutorialSettings, fetcher: F) -> Self {
        Self {
            settings,
            fetcher,
            dispatch: None,
        }
    }

    /// Route this acquirer's log events to `dispatch` instead of the global subscriber.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &TutorialSettings {
        &self.settings
    }

    /// Make sure `target` holds a complete tutorial case.
    ///
    /// Tries, in order: an existing case in `target`, a copy of the system
    /// installation, and a per-file download. On terminal failure anything this
    /// call created is removed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TutorialError::Retrieval`] when no tier produced the marker
    /// file, or [`TutorialError::Io`] when the case directories cannot be created.
    pub fn acquire(&self, target: &Path) -> TutorialResult<Acquisition> {
        match &self.dispatch {
            Some(dispatch) => {
                tracing::dispatcher::with_default(dispatch, || self.acquire_inner(target))
            }
            None => self.acquire_inner(target),
        }
    }

    fn acquire_inner(&self, target: &Path) -> TutorialResult<Acquisition> {
        if target.join(MARKER_FILE).exists() {
            info!(path = %target.display(), "using existing tutorial");
            return Ok(Acquisition {
                path: target.to_path_buf(),
                source: AcquisitionSource::Existing,
                transfers: Vec::new(),
            });
        }

        if self.copy_from_system(target) {
            return Ok(Acquisition {
                path: target.to_path_buf(),
                source: AcquisitionSource::SystemCopy,
                transfers: Vec::new(),
            });
        }

        self.download(target, CreatedPaths::snapshot(target))
    }

    /// A failed or incomplete copy is undone before returning, so the download
    /// tier starts from the target as the caller left it.
    fn copy_from_system(&self, target: &Path) -> bool {
        let source = &self.settings.system_path;
        if !source.join(MARKER_FILE).exists() {
            info!(source = %source.display(), "system tutorial not available");
            return false;
        }

        info!(source = %source.display(), "copying tutorial from system installation");
        let mut created = CreatedPaths::snapshot(target);
        match copy_contents(source, target, &mut created) {
            Ok(()) if target.join(MARKER_FILE).exists() => {
                info!(path = %target.display(), "tutorial copied successfully");
                return true;
            }
            Ok(()) => warn!("system copy incomplete, falling back to download"),
            Err(error) => {
                warn!(error = ?error, "failed to copy from system, falling back to download");
            }
        }
        created.rollback();
        false
    }

    fn download(&self, target: &Path, mut created: CreatedPaths) -> TutorialResult<Acquisition> {
        info!(base_url = %self.settings.base_url, "downloading tutorial");

        for dir in REQUIRED_DIRS {
            let path = target.join(dir);
            if let Err(err) = created.ensure_dir(&path) {
                created.rollback();
                return Err(TutorialError::io("create_dir", path, err));
            }
        }

        let transfers: Vec<TransferRecord> = self
            .settings
            .manifest
            .iter()
            .map(|entry| {
                let destination = target.join(&entry.local);
                let (url, outcome) = match self.settings.base_url.join(&entry.remote) {
                    Ok(url) => {
                        info!(file = %entry.remote, "downloading");
                        let outcome = self.transfer(&url, &destination, &mut created);
                        (url.to_string(), outcome)
                    }
                    Err(err) => (
                        format!("{}{}", self.settings.base_url, entry.remote),
                        TransferOutcome::Failed {
                            reason: format!("invalid url: {err}"),
                        },
                    ),
                };
                if let TransferOutcome::Failed { reason } = &outcome {
                    error!(url = %url, reason = %reason, "failed to download {}", entry.remote);
                }
                TransferRecord {
                    relative_path: entry.local.clone(),
                    url,
                    outcome,
                }
            })
            .collect();

        if !target.join(MARKER_FILE).exists() {
            created.rollback();
            let failures = transfers
                .into_iter()
                .filter(TransferRecord::is_failed)
                .collect();
            return Err(TutorialError::Retrieval {
                target: target.to_path_buf(),
                failures,
            });
        }

        info!(path = %target.display(), "tutorial downloaded successfully");
        Ok(Acquisition {
            path: target.to_path_buf(),
            source: AcquisitionSource::Download,
            transfers,
        })
    }

    fn transfer(
        &self,
        url: &url::Url,
        destination: &Path,
        created: &mut CreatedPaths,
    ) -> TransferOutcome {
        let body = match self.fetcher.fetch(url) {
            Ok(body) => body,
            Err(err) => {
                return TransferOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        if let Some(parent) = destination.parent()
            && let Err(err) = created.ensure_dir(parent)
        {
            return TransferOutcome::Failed {
                reason: format!("failed to create {}: {err}", parent.display()),
            };
        }

        match created.write_file(destination, &body) {
            Ok(()) => TransferOutcome::Downloaded {
                bytes: u64::try_from(body.len()).unwrap_or(u64::MAX),
            },
            Err(err) => TransferOutcome::Failed {
                reason: format!("failed to write {}: {err}", destination.display()),
            },
        }
    }
}
