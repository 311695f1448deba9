use std::path::Path;

use anyhow::Result;

use provisioner::application::StatusUseCase;
use provisioner::infrastructure::{JsonArtifactRepository, TomlManifestRepository};

use crate::ui::output::{print_status, status_json, use_unicode};

pub fn cmd_status(config_path: Option<&Path>, network: Option<&str>, json: bool) -> Result<()> {
    let config = super::load_config(config_path, network)?;
    let network = config.default_network.clone();
    // Reject typos in the network name even though no connection is made.
    config.network(&network)?;

    let use_case = StatusUseCase::new(
        TomlManifestRepository::new(config.manifest_path()),
        JsonArtifactRepository::new(config.artifacts_dir()),
    );
    let report = use_case.run(&config.plan()?, &network)?;

    if json {
        println!("{}", status_json(&report));
    } else {
        print_status(&report, use_unicode());
    }
    Ok(())
}
