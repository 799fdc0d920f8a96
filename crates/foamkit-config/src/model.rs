//! Typed configuration models.
//!
//! # Design
//! - `ConfigDocument` is the layered, string-typed form read from disk and the
//!   environment; every field has a built-in default.
//! - `FoamkitConfig` is the validated form handed to services.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults;
use crate::error::ConfigResult;
use crate::validate::validate_document;

/// A remote file and the case-relative path it is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path appended to the tutorial base URL.
    pub remote: String,
    /// Destination relative to the case directory.
    pub local: PathBuf,
}

impl ManifestEntry {
    /// Entry whose remote and local paths are identical.
    #[must_use]
    pub fn mirrored(path: &str) -> Self {
        Self {
            remote: path.to_string(),
            local: PathBuf::from(path),
        }
    }

    /// The seven cavity tutorial files, each mapped onto itself.
    #[must_use]
    pub fn cavity_manifest() -> Vec<Self> {
        defaults::CAVITY_FILES
            .iter()
            .map(|path| Self::mirrored(path))
            .collect()
    }
}

/// Layered configuration document prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigDocument {
    /// Tutorial acquisition section.
    pub tutorial: TutorialDocument,
    /// Container runner section.
    pub docker: DockerSettings,
    /// Logging section.
    pub logging: LoggingSettings,
}

/// Unvalidated tutorial acquisition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TutorialDocument {
    /// Base URL that manifest entries are resolved against.
    pub base_url: String,
    /// Local tutorial copy probed before downloading.
    pub system_path: PathBuf,
    /// Files to download.
    pub manifest: Vec<ManifestEntry>,
    /// Optional HTTP timeout; the client default applies when unset.
    pub http_timeout_secs: Option<u64>,
}

impl Default for TutorialDocument {
    fn default() -> Self {
        Self {
            base_url: defaults::TUTORIAL_BASE_URL.to_string(),
            system_path: PathBuf::from(defaults::SYSTEM_TUTORIAL_PATH),
            manifest: ManifestEntry::cavity_manifest(),
            http_timeout_secs: None,
        }
    }
}

/// Validated configuration for every foamkit service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoamkitConfig {
    /// Tutorial acquisition settings.
    pub tutorial: TutorialSettings,
    /// Container runner settings.
    pub docker: DockerSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

impl FoamkitConfig {
    /// Built-in configuration with no file or environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error only if the compiled-in defaults fail validation.
    pub fn builtin() -> ConfigResult<Self> {
        validate_document(ConfigDocument::default())
    }
}

/// Validated tutorial acquisition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialSettings {
    /// Base URL ending in `/`; manifest remotes are joined onto it.
    pub base_url: Url,
    /// Local tutorial copy probed before downloading.
    pub system_path: PathBuf,
    /// Files to download, in order.
    pub manifest: Vec<ManifestEntry>,
    /// Optional HTTP timeout in seconds.
    pub http_timeout_secs: Option<u64>,
}

impl TutorialSettings {
    /// Settings using the cavity manifest and the given sources.
    #[must_use]
    pub fn new(base_url: Url, system_path: impl Into<PathBuf>) -> Self {
        Self {
            base_url,
            system_path: system_path.into(),
            manifest: ManifestEntry::cavity_manifest(),
            http_timeout_secs: None,
        }
    }

    /// HTTP timeout as a duration.
    #[must_use]
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}

/// Container runner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DockerSettings {
    /// Image providing `OpenFOAM`.
    pub image: String,
    /// Mount point of the case directory inside the container.
    pub workdir: String,
    /// Environment script sourced before each command.
    pub bashrc: String,
}

impl Default for DockerSettings {
    fn default() -> Self {
        Self {
            image: defaults::DOCKER_IMAGE.to_string(),
            workdir: defaults::CONTAINER_WORKDIR.to_string(),
            bashrc: defaults::OPENFOAM_BASHRC.to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Level or filter directive.
    pub level: String,
    /// `json`, `pretty`, or `auto`.
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: defaults::LOG_FORMAT.to_string(),
        }
    }
}
