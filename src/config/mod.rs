//! Configuration module
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PROVISIONER_*)
//! 3. `provisioner.toml` (explicit `--config` path or the working directory)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    apply_overrides, load_or_default, ENV_FROM, ENV_MANIFEST, ENV_NETWORK, ENV_RPC_URL,
};
pub use types::{Config, NetworkConfig, PathsConfig, RetryConfig, UnitConfig, CONFIG_FILE};
