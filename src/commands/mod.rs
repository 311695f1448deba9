//! Command handlers
//!
//! Each handler loads configuration, wires infrastructure into a use case
//! and renders the result.

pub mod deploy;
pub mod export_abis;
pub mod export_env;
pub mod status;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use provisioner::config::{self, Config};
use provisioner::infrastructure::{JsonRpcConfig, JsonRpcLedger};

use crate::ui::output::print_config_warnings;

/// Load configuration, select the network and apply `PROVISIONER_*`
/// overrides.
pub fn load_config(explicit: Option<&Path>, network: Option<&str>) -> Result<Config> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let (config, warnings) = config::load_or_default(explicit, &cwd)?;
    print_config_warnings(&warnings);

    let config = config.with_env_overrides(network);
    debug!(
        network = %config.default_network,
        source = ?config.source,
        "configuration loaded"
    );
    Ok(config)
}

/// JSON-RPC connection for the selected network.
pub fn connect(config: &Config, network: &str) -> Result<JsonRpcLedger> {
    let net = config.network(network)?;
    let rpc = JsonRpcConfig {
        url: net.rpc_url.clone(),
        from: config.sender(network)?,
        request_timeout: net.request_timeout(),
    };
    JsonRpcLedger::new(rpc).context("failed to build HTTP client")
}
