use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use provisioner::application::EnvExport;
use provisioner::domain::ports::ManifestRepository;
use provisioner::infrastructure::fs::{atomic_write, read_optional};
use provisioner::infrastructure::TomlManifestRepository;

pub fn cmd_export_env(
    config_path: Option<&Path>,
    network: Option<&str>,
    env_file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = super::load_config(config_path, network)?;
    let network = config.default_network.clone();
    let rpc_url = config.network(&network)?.rpc_url.clone();

    let manifest = TomlManifestRepository::new(config.manifest_path()).load()?;
    let export = EnvExport::from_manifest(&manifest, &config.plan()?, &network, &rpc_url)?;

    let path = match env_file {
        Some(path) => path.to_path_buf(),
        None => config.env_file(),
    };
    let existing = read_optional(&path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .unwrap_or_default();
    atomic_write(&path, export.render(&existing).as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), count = export.address_count(), "env file updated");

    if json {
        let keys: Vec<_> = export.vars().iter().map(|(k, _)| k.as_str()).collect();
        println!(
            "{}",
            serde_json::json!({
                "event": "export",
                "command": "export-env",
                "network": network,
                "path": path.display().to_string(),
                "keys": keys,
            })
        );
    } else {
        println!(
            "Wrote {} contract address(es) for {} to {}",
            export.address_count(),
            network,
            path.display()
        );
    }
    Ok(())
}
