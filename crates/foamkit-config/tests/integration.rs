use std::fs;
use std::path::PathBuf;

use foamkit_config::{ConfigError, ManifestEntry, load_with};
use serde_json::json;

#[test]
fn custom_manifest_round_trips_through_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("foamkit.json");
    let document = json!({
        "tutorial": {
            "base_url": "https://mirror.example/cavity/",
            "system_path": "/srv/openfoam/cavity",
            "manifest": [
                {"remote": "system/controlDict", "local": "system/controlDict"},
                {"remote": "0.orig/U", "local": "0/U"}
            ],
            "http_timeout_secs": 30
        },
        "docker": {"image": "opencfd/openfoam-default:2412"}
    });
    fs::write(&path, serde_json::to_vec_pretty(&document)?)?;

    let config = load_with(Some(&path), |_| None)?;
    assert_eq!(config.tutorial.manifest.len(), 2);
    assert_eq!(
        config.tutorial.manifest[1],
        ManifestEntry {
            remote: "0.orig/U".to_string(),
            local: PathBuf::from("0/U"),
        }
    );
    assert_eq!(
        config.tutorial.http_timeout(),
        Some(std::time::Duration::from_secs(30))
    );
    assert_eq!(config.docker.image, "opencfd/openfoam-default:2412");
    assert_eq!(config.docker.workdir, "/home/openfoam/project");

    let rendered = serde_json::to_value(&config)?;
    assert_eq!(
        rendered["tutorial"]["base_url"],
        json!("https://mirror.example/cavity/")
    );
    Ok(())
}

#[test]
fn manifest_escaping_the_case_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("foamkit.json");
    let document = json!({
        "tutorial": {
            "manifest": [
                {"remote": "system/controlDict", "local": "system/controlDict"},
                {"remote": "0/U", "local": "../outside/U"}
            ]
        }
    });
    fs::write(&path, serde_json::to_vec(&document)?)?;

    let err = load_with(Some(&path), |_| None).err();
    assert!(matches!(
        err,
        Some(ConfigError::InvalidField {
            field: "manifest.local",
            reason: "must not contain '..'",
            ..
        })
    ));
    Ok(())
}
