//! Layered configuration loading: built-in defaults, an optional JSON file,
//! then `FOAMKIT_*` environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{ConfigDocument, FoamkitConfig};
use crate::validate::validate_document;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "FOAMKIT_";

const ENV_BASE_URL: &str = "FOAMKIT_TUTORIAL_BASE_URL";
const ENV_SYSTEM_TUTORIAL: &str = "FOAMKIT_SYSTEM_TUTORIAL";
const ENV_HTTP_TIMEOUT: &str = "FOAMKIT_HTTP_TIMEOUT_SECS";
const ENV_IMAGE: &str = "FOAMKIT_IMAGE";
const ENV_WORKDIR: &str = "FOAMKIT_CONTAINER_WORKDIR";
const ENV_LOG_LEVEL: &str = "FOAMKIT_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "FOAMKIT_LOG_FORMAT";

/// Load configuration from an optional file and the process environment.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the merged
/// configuration fails validation.
pub fn load(path: Option<&Path>) -> ConfigResult<FoamkitConfig> {
    load_with(path, |key| std::env::var(key).ok())
}

/// Load configuration using `lookup` in place of the process environment.
///
/// # Errors
///
/// See [`load`].
pub fn load_with<F>(path: Option<&Path>, lookup: F) -> ConfigResult<FoamkitConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut document = match path {
        Some(path) => read_document(path)?,
        None => ConfigDocument::default(),
    };
    apply_env_overrides(&mut document, &lookup)?;
    validate_document(document)
}

fn read_document(path: &Path) -> ConfigResult<ConfigDocument> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded configuration file");
    Ok(document)
}

fn apply_env_overrides<F>(document: &mut ConfigDocument, lookup: &F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &'static str| {
        let value = lookup(key).filter(|value| !value.trim().is_empty());
        if value.is_some() {
            debug!(key, "applying environment override");
        }
        value
    };

    if let Some(value) = read(ENV_BASE_URL) {
        document.tutorial.base_url = value;
    }
    if let Some(value) = read(ENV_SYSTEM_TUTORIAL) {
        document.tutorial.system_path = PathBuf::from(value);
    }
    if let Some(value) = read(ENV_HTTP_TIMEOUT) {
        let secs = value.trim().parse::<u64>().map_err(|_| {
            ConfigError::invalid(
                "tutorial",
                "http_timeout_secs",
                Some(value.clone()),
                "must be an integer number of seconds",
            )
        })?;
        document.tutorial.http_timeout_secs = Some(secs);
    }
    if let Some(value) = read(ENV_IMAGE) {
        document.docker.image = value;
    }
    if let Some(value) = read(ENV_WORKDIR) {
        document.docker.workdir = value;
    }
    if let Some(value) = read(ENV_LOG_LEVEL) {
        document.logging.level = value;
    }
    if let Some(value) = read(ENV_LOG_FORMAT) {
        document.logging.format = value;
    }
    Ok(())
}
