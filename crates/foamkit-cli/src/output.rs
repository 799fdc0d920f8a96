//! Output renderers for CLI commands.

use anyhow::anyhow;
use foamkit_config::FoamkitConfig;
use foamkit_tutorial::{Acquisition, TransferOutcome, TransferRecord};
use serde_json::{Value, json};

use crate::cli::OutputFormat;
use crate::errors::{CliError, CliResult};

pub(crate) fn render_acquisition(acquisition: &Acquisition, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let transfers: Vec<Value> = acquisition
                .transfers()
                .iter()
                .map(transfer_json)
                .collect();
            print_json(&json!({
                "path": acquisition.path(),
                "source": acquisition.source().as_str(),
                "transfers": transfers,
            }))?;
        }
        OutputFormat::Table => {
            println!("path: {}", acquisition.path().display());
            println!("source: {}", acquisition.source().as_str());
            for record in acquisition.transfers() {
                match &record.outcome {
                    TransferOutcome::Downloaded { bytes } => {
                        println!("  {:<40} {bytes:>8} B", record.relative_path.display());
                    }
                    TransferOutcome::Failed { reason } => {
                        println!("  {:<40} failed: {reason}", record.relative_path.display());
                    }
                }
            }
        }
    }
    Ok(())
}

fn transfer_json(record: &TransferRecord) -> Value {
    match &record.outcome {
        TransferOutcome::Downloaded { bytes } => json!({
            "path": record.relative_path,
            "url": record.url,
            "bytes": bytes,
            "reason": null,
        }),
        TransferOutcome::Failed { reason } => json!({
            "path": record.relative_path,
            "url": record.url,
            "bytes": null,
            "reason": reason,
        }),
    }
}

pub(crate) fn render_config(config: &FoamkitConfig, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::to_value(config)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            print_json(&value)?;
        }
        OutputFormat::Table => {
            println!("tutorial.base_url: {}", config.tutorial.base_url);
            println!(
                "tutorial.system_path: {}",
                config.tutorial.system_path.display()
            );
            println!("tutorial.manifest: {} files", config.tutorial.manifest.len());
            if let Some(timeout) = config.tutorial.http_timeout_secs {
                println!("tutorial.http_timeout_secs: {timeout}");
            }
            println!("docker.image: {}", config.docker.image);
            println!("docker.workdir: {}", config.docker.workdir);
            println!("docker.bashrc: {}", config.docker.bashrc);
            println!("logging.level: {}", config.logging.level);
            println!("logging.format: {}", config.logging.format);
        }
    }
    Ok(())
}

pub(crate) fn print_json(value: &Value) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn failed_transfers_carry_their_reason() {
        let failed = TransferRecord {
            relative_path: PathBuf::from("0/U"),
            url: "http://origin.test/cavity/0/U".to_string(),
            outcome: TransferOutcome::Failed {
                reason: "http status 404".to_string(),
            },
        };
        let value = transfer_json(&failed);
        assert_eq!(value["reason"], "http status 404");
        assert!(value["bytes"].is_null());
        assert_eq!(value["url"], "http://origin.test/cavity/0/U");
    }

    #[test]
    fn downloaded_transfers_report_bytes() {
        let downloaded = TransferRecord {
            relative_path: PathBuf::from("system/controlDict"),
            url: "http://origin.test/cavity/system/controlDict".to_string(),
            outcome: TransferOutcome::Downloaded { bytes: 42 },
        };
        let value = transfer_json(&downloaded);
        assert_eq!(value["bytes"], 42);
        assert!(value["reason"].is_null());
    }
}
