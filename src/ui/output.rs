use std::io;

use is_terminal::IsTerminal;

use provisioner::application::{StatusReport, UnitState};
use provisioner::config::ConfigWarning;
use provisioner::error::ProvisionError;

/// Unicode icons only on an interactive, non-dumb terminal.
pub fn use_unicode() -> bool {
    let dumb = std::env::var("TERM")
        .map(|t| t.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false);
    io::stdout().is_terminal() && !dumb
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!(
                "warning: unknown config key '{}' in {}:{}",
                w.key,
                w.file.display(),
                line
            );
        } else {
            eprintln!(
                "warning: unknown config key '{}' in {}",
                w.key,
                w.file.display()
            );
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}

/// Report a failed command: the error chain on stderr, plus an NDJSON
/// `error` event on stdout in `--json` mode.
pub fn print_error(err: &anyhow::Error, command: &str, json: bool) {
    let provision = err.downcast_ref::<ProvisionError>();

    if json {
        let (unit, kind) = match provision {
            Some(ProvisionError::DeploymentFailed { unit, cause }) => {
                (Some(unit.as_str()), cause.kind())
            }
            Some(ProvisionError::Interrupted { unit }) => (Some(unit.as_str()), "interrupted"),
            Some(ProvisionError::Connection { .. }) => (None, "connection"),
            Some(ProvisionError::Manifest(_)) => (None, "manifest"),
            Some(ProvisionError::NothingToExport { .. } | ProvisionError::NoArtifacts { .. }) => {
                (None, "nothing_to_export")
            }
            Some(ProvisionError::ArtifactExport { unit, .. }) => (Some(unit.as_str()), "artifact"),
            Some(_) => (None, "invalid_input"),
            None => (None, "error"),
        };
        println!(
            "{}",
            serde_json::json!({
                "event": "error",
                "command": command,
                "kind": kind,
                "unit": unit,
                "message": format!("{err:#}"),
            })
        );
    }

    eprintln!("Error: {err}");
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    if let Some(ProvisionError::DeploymentFailed { .. } | ProvisionError::Interrupted { .. }) =
        provision
    {
        eprintln!("  Units confirmed before the failure stay recorded; rerun to resume.");
    }
}

pub fn print_status(report: &StatusReport, unicode: bool) {
    let (ok, missing, changed) = if unicode {
        ("✓", "○", "⚠")
    } else {
        ("[OK]", "[ ]", "[WARN]")
    };

    println!("Network: {}", report.network);
    let width = report
        .units
        .iter()
        .map(|u| u.unit.len())
        .max()
        .unwrap_or(0);

    for status in &report.units {
        match &status.state {
            UnitState::NotDeployed => {
                println!("  {missing} {:<width$}  not deployed", status.unit);
            }
            UnitState::Deployed {
                record,
                artifact_changed,
            } => {
                let address = record
                    .address()
                    .map(|a| a.to_string())
                    .unwrap_or_default();
                let icon = if *artifact_changed == Some(true) {
                    changed
                } else {
                    ok
                };
                let mut line = format!("  {icon} {:<width$}  {address}", status.unit);
                if let Some(block) = record.block_number() {
                    line.push_str(&format!("  block {block}"));
                }
                match artifact_changed {
                    Some(true) => line.push_str("  (artifact changed since deployment)"),
                    None => line.push_str("  (artifact not found)"),
                    Some(false) => {}
                }
                println!("{line}");
            }
        }
    }

    println!(
        "{} of {} deployed",
        report.deployed_count(),
        report.units.len()
    );
}

pub fn status_json(report: &StatusReport) -> serde_json::Value {
    let units: Vec<_> = report
        .units
        .iter()
        .map(|status| match &status.state {
            UnitState::NotDeployed => serde_json::json!({
                "unit": status.unit,
                "deployed": false,
            }),
            UnitState::Deployed {
                record,
                artifact_changed,
            } => serde_json::json!({
                "unit": status.unit,
                "deployed": true,
                "address": record.address().map(|a| a.as_str()),
                "tx_hash": record.tx_hash().as_str(),
                "chain_id": record.chain_id(),
                "block_number": record.block_number(),
                "deployed_at": record.deployed_at().to_rfc3339(),
                "artifact_changed": artifact_changed,
            }),
        })
        .collect();

    serde_json::json!({
        "event": "status",
        "command": "status",
        "network": report.network,
        "deployed": report.deployed_count(),
        "units": units,
    })
}
