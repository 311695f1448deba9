use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;

use provisioner::application::DeployUseCase;
use provisioner::domain::ports::DeployEventSink;
use provisioner::infrastructure::{
    ConsoleEventSink, JsonArtifactRepository, JsonEventSink, TomlManifestRepository,
};

use crate::ui::output::use_unicode;

pub fn cmd_deploy(
    config_path: Option<&Path>,
    network: Option<&str>,
    force: bool,
    dry_run: bool,
    json: bool,
    interrupted: Arc<AtomicBool>,
) -> Result<()> {
    let config = super::load_config(config_path, network)?;
    let network = config.default_network.clone();

    let plan = config.plan()?;
    let options = config.deploy_options(&network, force, dry_run)?;
    let ledger = super::connect(&config, &network)?;

    let event_sink: Arc<dyn DeployEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(use_unicode()))
    };

    let use_case = DeployUseCase::new(
        ledger,
        TomlManifestRepository::new(config.manifest_path()),
        JsonArtifactRepository::new(config.artifacts_dir()),
    )
    .with_event_sink(event_sink)
    .with_interrupt_flag(interrupted);

    let report = use_case.run(&plan, &options)?;

    if !json && report.deployed_count() > 0 {
        println!(
            "Recorded in {}",
            use_case.manifest_repo().path().display()
        );
    }
    Ok(())
}
