//! Validation helpers that turn a [`ConfigDocument`] into a [`FoamkitConfig`].

use std::collections::HashSet;
use std::path::{Component, Path};

use url::Url;

use crate::defaults::MARKER_FILE;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{
    ConfigDocument, DockerSettings, FoamkitConfig, LoggingSettings, ManifestEntry,
    TutorialSettings,
};

const LOG_FORMATS: [&str; 3] = ["auto", "json", "pretty"];

/// Validate every section of a layered document.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for the first field that fails validation.
pub fn validate_document(document: ConfigDocument) -> ConfigResult<FoamkitConfig> {
    let ConfigDocument {
        tutorial,
        docker,
        logging,
    } = document;

    let base_url = parse_base_url(&tutorial.base_url)?;
    if tutorial.system_path.as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            "tutorial",
            "system_path",
            None,
            "must not be empty",
        ));
    }
    validate_manifest(&tutorial.manifest)?;
    validate_remotes_resolve(&base_url, &tutorial.manifest)?;
    if tutorial.http_timeout_secs == Some(0) {
        return Err(ConfigError::invalid(
            "tutorial",
            "http_timeout_secs",
            Some("0".to_string()),
            "must be positive",
        ));
    }
    validate_docker(&docker)?;
    validate_logging(&logging)?;

    Ok(FoamkitConfig {
        tutorial: TutorialSettings {
            base_url,
            system_path: tutorial.system_path,
            manifest: tutorial.manifest,
            http_timeout_secs: tutorial.http_timeout_secs,
        },
        docker,
        logging,
    })
}

/// Parse the tutorial base URL, ensuring it is HTTP(S) and ends in `/` so
/// relative joins append rather than replace the last segment.
///
/// # Errors
///
/// Returns an error when the value is not an absolute HTTP(S) URL.
pub fn parse_base_url(value: &str) -> ConfigResult<Url> {
    let mut url = Url::parse(value.trim()).map_err(|_| {
        ConfigError::invalid(
            "tutorial",
            "base_url",
            Some(value.to_string()),
            "must be an absolute URL",
        )
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "tutorial",
            "base_url",
            Some(value.to_string()),
            "scheme must be http or https",
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Ensure a path is non-empty, relative, and free of `..` segments.
///
/// # Errors
///
/// Returns an error naming `section.field` when the path escapes its root.
pub fn validate_relative_path(
    section: &'static str,
    field: &'static str,
    path: &Path,
) -> ConfigResult<()> {
    let display = || Some(path.display().to_string());
    if path.as_os_str().is_empty() {
        return Err(ConfigError::invalid(section, field, None, "must not be empty"));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ConfigError::invalid(
                    section,
                    field,
                    display(),
                    "must not contain '..'",
                ));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ConfigError::invalid(
                    section,
                    field,
                    display(),
                    "must be relative",
                ));
            }
        }
    }
    Ok(())
}

/// Validate the download manifest: relative paths, unique destinations, and
/// the completeness marker present.
///
/// # Errors
///
/// Returns an error for the first offending entry.
pub fn validate_manifest(entries: &[ManifestEntry]) -> ConfigResult<()> {
    if entries.is_empty() {
        return Err(ConfigError::invalid(
            "tutorial",
            "manifest",
            None,
            "must list at least one file",
        ));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if entry.remote.contains([':', '?', '#', '\\']) {
            return Err(ConfigError::invalid(
                "tutorial",
                "manifest.remote",
                Some(entry.remote.clone()),
                "must be a plain relative path",
            ));
        }
        validate_relative_path("tutorial", "manifest.remote", Path::new(&entry.remote))?;
        validate_relative_path("tutorial", "manifest.local", &entry.local)?;
        if !seen.insert(entry.local.as_path()) {
            return Err(ConfigError::invalid(
                "tutorial",
                "manifest.local",
                Some(entry.local.display().to_string()),
                "must be unique",
            ));
        }
    }

    if !seen.contains(Path::new(MARKER_FILE)) {
        return Err(ConfigError::invalid(
            "tutorial",
            "manifest",
            Some(MARKER_FILE.to_string()),
            "must include the marker file",
        ));
    }
    Ok(())
}

/// Ensure every manifest remote, joined onto `base_url`, stays beneath it.
///
/// # Errors
///
/// Returns an error for the first remote that resolves elsewhere.
pub fn validate_remotes_resolve(base_url: &Url, entries: &[ManifestEntry]) -> ConfigResult<()> {
    for entry in entries {
        let under_base = base_url
            .join(&entry.remote)
            .is_ok_and(|url| url.as_str().starts_with(base_url.as_str()));
        if !under_base {
            return Err(ConfigError::invalid(
                "tutorial",
                "manifest.remote",
                Some(entry.remote.clone()),
                "must resolve under base_url",
            ));
        }
    }
    Ok(())
}

/// Validate container runner settings.
///
/// # Errors
///
/// Returns an error for an empty or whitespace-bearing image, or a relative workdir.
pub fn validate_docker(settings: &DockerSettings) -> ConfigResult<()> {
    let image = settings.image.trim();
    if image.is_empty() {
        return Err(ConfigError::invalid("docker", "image", None, "must not be empty"));
    }
    if image.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid(
            "docker",
            "image",
            Some(settings.image.clone()),
            "must not contain whitespace",
        ));
    }
    if !settings.workdir.starts_with('/') {
        return Err(ConfigError::invalid(
            "docker",
            "workdir",
            Some(settings.workdir.clone()),
            "must be an absolute container path",
        ));
    }
    if settings.bashrc.trim().is_empty() {
        return Err(ConfigError::invalid("docker", "bashrc", None, "must not be empty"));
    }
    Ok(())
}

/// Validate logging settings.
///
/// # Errors
///
/// Returns an error for an empty level or an unknown format.
pub fn validate_logging(settings: &LoggingSettings) -> ConfigResult<()> {
    if settings.level.trim().is_empty() {
        return Err(ConfigError::invalid("logging", "level", None, "must not be empty"));
    }
    let format = settings.format.trim().to_ascii_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        return Err(ConfigError::invalid(
            "logging",
            "format",
            Some(settings.format.clone()),
            "must be one of auto, json, pretty",
        ));
    }
    Ok(())
}
