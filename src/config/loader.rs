//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, ProvisionResult};

use super::types::{Config, NetworkConfig, CONFIG_FILE};

pub use crate::domain::value_objects::ConfigWarning;

pub const ENV_NETWORK: &str = "PROVISIONER_NETWORK";
pub const ENV_RPC_URL: &str = "PROVISIONER_RPC_URL";
pub const ENV_FROM: &str = "PROVISIONER_FROM";
pub const ENV_MANIFEST: &str = "PROVISIONER_MANIFEST";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ProvisionResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ProvisionError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    config.source = Some(path.to_path_buf());

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the explicit config file, or `provisioner.toml` in `dir`, or defaults.
///
/// An explicit path must exist; the implicit one is optional.
pub fn load_or_default(
    explicit: Option<&Path>,
    dir: &Path,
) -> ProvisionResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        return load_with_warnings(path);
    }

    let implicit = dir.join(CONFIG_FILE);
    if implicit.exists() {
        return load_with_warnings(&implicit);
    }

    let config = Config {
        base_dir: dir.to_path_buf(),
        ..Config::default()
    };
    Ok((config, Vec::new()))
}

/// Apply environment variable overrides (PROVISIONER_* prefix)
pub fn with_env_overrides(config: Config, network: Option<&str>) -> Config {
    apply_overrides(config, network, |key| std::env::var(key).ok())
}

/// Select the network and apply overrides read through `lookup`.
///
/// Precedence for the network: `network` (a CLI flag), then
/// `PROVISIONER_NETWORK`, then `default_network`. RPC URL and sender
/// overrides apply to the selected network, creating it if needed.
pub fn apply_overrides(
    mut config: Config,
    network: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    if let Some(name) = network
        .map(str::to_string)
        .or_else(|| lookup(ENV_NETWORK).filter(|v| !v.is_empty()))
    {
        config.default_network = name;
    }

    if let Some(url) = lookup(ENV_RPC_URL).filter(|v| !v.is_empty()) {
        config
            .networks
            .entry(config.default_network.clone())
            .and_modify(|net| net.rpc_url = url.clone())
            .or_insert_with(|| NetworkConfig::new(url));
    }

    if let Some(from) = lookup(ENV_FROM).filter(|v| !v.is_empty()) {
        if let Some(net) = config.networks.get_mut(&config.default_network) {
            net.from = Some(from);
        }
    }

    if let Some(manifest) = lookup(ENV_MANIFEST).filter(|v| !v.is_empty()) {
        config.paths.manifest = PathBuf::from(manifest);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "default_network",
        "networks",
        "rpc_url",
        "chain_id",
        "from",
        "gas_limit",
        "confirmations",
        "confirmation_timeout_secs",
        "poll_interval_ms",
        "request_timeout_secs",
        "retry",
        "max_attempts",
        "initial_backoff_ms",
        "max_backoff_ms",
        "paths",
        "artifacts",
        "manifest",
        "env_file",
        "abis",
        "units",
        "name",
        "artifact",
        "constructor_args",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
