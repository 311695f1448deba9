//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::{DeployOptions, RetryPolicy};
use crate::domain::entities::{DeployableUnit, DeploymentPlan};
use crate::domain::value_objects::Address;
use crate::error::{ProvisionError, ProvisionResult};

use super::loader::{self, ConfigWarning};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "provisioner.toml";

/// One ledger the plan can be deployed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,

    /// Pin the chain id; a node reporting another id is refused
    #[serde(default)]
    pub chain_id: Option<u64>,

    /// Sending account; the node's first account when unset
    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub gas_limit: Option<u64>,

    #[serde(default = "default_confirmations")]
    pub confirmations: u64,

    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl NetworkConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            chain_id: None,
            from: None,
            gas_limit: None,
            confirmations: default_confirmations(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_confirmations() -> u64 {
    1
}

fn default_confirmation_timeout_secs() -> u64 {
    120
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Backoff for transient ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    250
}

fn default_max_backoff_ms() -> u64 {
    4000
}

/// File locations, relative to the config file's directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,

    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Where `export-abis` publishes build artifacts
    #[serde(default = "default_abis")]
    pub abis: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifacts: default_artifacts(),
            manifest: default_manifest(),
            env_file: default_env_file(),
            abis: default_abis(),
        }
    }
}

fn default_artifacts() -> PathBuf {
    PathBuf::from("build/contracts")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("deployments.toml")
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_abis() -> PathBuf {
    PathBuf::from("abis")
}

/// One `[[units]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub name: String,

    /// Artifact path relative to `paths.artifacts`; `<name>.json` when unset
    #[serde(default)]
    pub artifact: Option<PathBuf>,

    /// ABI-encoded constructor arguments as hex
    #[serde(default)]
    pub constructor_args: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_network_name")]
    pub default_network: String,

    #[serde(default = "default_networks")]
    pub networks: BTreeMap<String, NetworkConfig>,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    /// Deployment order; the credential modules when empty
    #[serde(default)]
    pub units: Vec<UnitConfig>,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,

    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn default_network_name() -> String {
    "development".to_string()
}

fn default_networks() -> BTreeMap<String, NetworkConfig> {
    BTreeMap::from([(
        default_network_name(),
        NetworkConfig::new("http://127.0.0.1:8545"),
    )])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_network: default_network_name(),
            networks: default_networks(),
            retry: RetryConfig::default(),
            paths: PathsConfig::default(),
            units: Vec::new(),
            base_dir: PathBuf::from("."),
            source: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ProvisionResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ProvisionResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (PROVISIONER_* prefix)
    pub fn with_env_overrides(self, network: Option<&str>) -> Self {
        loader::with_env_overrides(self, network)
    }

    fn error(&self, message: impl Into<String>) -> ProvisionError {
        ProvisionError::Config {
            file: self
                .source
                .clone()
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE)),
            message: message.into(),
        }
    }

    /// Settings for `name`
    pub fn network(&self, name: &str) -> ProvisionResult<&NetworkConfig> {
        self.networks
            .get(name)
            .ok_or_else(|| ProvisionError::UnknownNetwork {
                name: name.to_string(),
                known: self
                    .networks
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Sending account configured for `network`, if any
    pub fn sender(&self, network: &str) -> ProvisionResult<Option<Address>> {
        match &self.network(network)?.from {
            None => Ok(None),
            Some(raw) => Address::parse(raw)
                .map(Some)
                .map_err(|e| self.error(format!("networks.{network}.from: {e}"))),
        }
    }

    /// Deployment plan from `[[units]]`, or the credential modules.
    pub fn plan(&self) -> ProvisionResult<DeploymentPlan> {
        if self.units.is_empty() {
            return Ok(DeploymentPlan::credential_modules());
        }

        let mut units = Vec::with_capacity(self.units.len());
        for entry in &self.units {
            let mut unit = DeployableUnit::new(entry.name.as_str())?;
            if let Some(artifact) = &entry.artifact {
                unit = unit.with_artifact(artifact);
            }
            let args = entry.constructor_args.trim();
            let args = args.strip_prefix("0x").unwrap_or(args);
            if !args.is_empty() {
                let bytes = hex::decode(args).map_err(|e| {
                    self.error(format!("constructor_args of {}: {e}", entry.name))
                })?;
                unit = unit.with_constructor_args(bytes);
            }
            units.push(unit);
        }
        Ok(DeploymentPlan::new(units)?)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts.max(1),
            initial_backoff: Duration::from_millis(self.retry.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.retry.max_backoff_ms),
        }
    }

    /// Sequencer options for `network`
    pub fn deploy_options(
        &self,
        network: &str,
        force: bool,
        dry_run: bool,
    ) -> ProvisionResult<DeployOptions> {
        let net = self.network(network)?;
        Ok(DeployOptions::new(network)
            .with_expected_chain_id(net.chain_id)
            .with_force(force)
            .with_dry_run(dry_run)
            .with_confirmations(net.confirmations)
            .with_confirmation_timeout(Duration::from_secs(net.confirmation_timeout_secs))
            .with_poll_interval(Duration::from_millis(net.poll_interval_ms))
            .with_gas_limit(net.gas_limit)
            .with_retry(self.retry_policy()))
    }

    /// Resolve a configured path against the config file's directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.artifacts)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.resolve_path(&self.paths.manifest)
    }

    pub fn env_file(&self) -> PathBuf {
        self.resolve_path(&self.paths.env_file)
    }

    pub fn abis_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.abis)
    }
}
