//! TOML Manifest Repository
//!
//! Persists the deployment manifest, `deployments.toml` by default:
//!
//! ```toml
//! version = 1
//!
//! [networks.development.DIDRegistry]
//! chain_id = 1337
//! address = "0x..."
//! tx_hash = "0x..."
//! artifact_hash = "sha256:..."
//! block_number = 3
//! deployed_at = "2026-01-01T00:00:00Z"
//!
//! [[history]]
//! network = "development"
//! unit = "DIDRegistry"
//! # same fields as above
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{DeploymentRecord, Manifest};
use crate::domain::ports::{ManifestError, ManifestRepository, ManifestResult};
use crate::domain::value_objects::{Address, ContentHash, TxHash};
use crate::infrastructure::fs::{atomic_write, read_optional};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlRecord {
    chain_id: u64,
    address: String,
    tx_hash: String,
    artifact_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block_number: Option<u64>,
    deployed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlHistoryEntry {
    network: String,
    unit: String,
    chain_id: u64,
    address: String,
    tx_hash: String,
    artifact_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block_number: Option<u64>,
    deployed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlManifest {
    version: u32,
    #[serde(default)]
    networks: BTreeMap<String, BTreeMap<String, TomlRecord>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    history: Vec<TomlHistoryEntry>,
}

pub struct TomlManifestRepository {
    path: PathBuf,
}

impl TomlManifestRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Run `f` while holding the exclusive lock file.
    fn with_lock<T>(&self, f: impl FnOnce() -> ManifestResult<T>) -> ManifestResult<T> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let lock_file = fs::File::create(&lock_path).map_err(io_error)?;
        lock_file.lock_exclusive().map_err(io_error)?;

        let result = f();

        let _ = lock_file.unlock();
        result
    }

    fn load_from_disk(&self) -> ManifestResult<Manifest> {
        let Some(content) = read_optional(&self.path).map_err(io_error)? else {
            return Ok(Manifest::new());
        };

        let toml_manifest: TomlManifest = toml::from_str(&content)
            .map_err(|e| ManifestError::ParseError(format!("{}: {e}", self.path.display())))?;
        from_toml(toml_manifest)
    }

    fn save_to_disk(&self, manifest: &Manifest) -> ManifestResult<()> {
        let content = toml::to_string_pretty(&to_toml(manifest))
            .map_err(|e| ManifestError::ParseError(e.to_string()))?;
        atomic_write(&self.path, content.as_bytes()).map_err(io_error)?;
        debug!(path = %self.path.display(), entries = manifest.len(), "manifest written");
        Ok(())
    }
}

impl ManifestRepository for TomlManifestRepository {
    fn load(&self) -> ManifestResult<Manifest> {
        self.load_from_disk()
    }

    fn append(&self, record: &DeploymentRecord) -> ManifestResult<()> {
        self.with_lock(|| {
            let mut manifest = self.load_from_disk()?;
            manifest.record(record.clone())?;
            self.save_to_disk(&manifest)
        })
    }
}

fn io_error(e: std::io::Error) -> ManifestError {
    ManifestError::IoError(e.to_string())
}

fn parse_error(e: impl std::fmt::Display) -> ManifestError {
    ManifestError::ParseError(e.to_string())
}

#[allow(clippy::too_many_arguments)]
fn restore(
    network: String,
    unit: String,
    chain_id: u64,
    address: &str,
    tx_hash: &str,
    artifact_hash: &str,
    block_number: Option<u64>,
    deployed_at: DateTime<Utc>,
) -> ManifestResult<DeploymentRecord> {
    Ok(DeploymentRecord::restored(
        unit,
        network,
        chain_id,
        TxHash::parse(tx_hash).map_err(parse_error)?,
        ContentHash::new(artifact_hash),
        Address::parse(address).map_err(parse_error)?,
        block_number,
        deployed_at,
    ))
}

fn from_toml(toml_manifest: TomlManifest) -> ManifestResult<Manifest> {
    if toml_manifest.version != Manifest::VERSION {
        return Err(ManifestError::VersionMismatch {
            found: toml_manifest.version,
            expected: Manifest::VERSION,
        });
    }

    let mut manifest = Manifest::new();
    for (network, units) in toml_manifest.networks {
        for (unit, r) in units {
            manifest.insert_latest(restore(
                network.clone(),
                unit,
                r.chain_id,
                &r.address,
                &r.tx_hash,
                &r.artifact_hash,
                r.block_number,
                r.deployed_at,
            )?);
        }
    }
    for h in toml_manifest.history {
        manifest.push_history(restore(
            h.network,
            h.unit,
            h.chain_id,
            &h.address,
            &h.tx_hash,
            &h.artifact_hash,
            h.block_number,
            h.deployed_at,
        )?);
    }
    Ok(manifest)
}

fn to_toml_record(record: &DeploymentRecord) -> TomlRecord {
    TomlRecord {
        chain_id: record.chain_id(),
        address: record
            .address()
            .map(|a| a.to_string())
            .unwrap_or_default(),
        tx_hash: record.tx_hash().to_string(),
        artifact_hash: record.artifact_hash().to_string(),
        block_number: record.block_number(),
        deployed_at: record.deployed_at(),
    }
}

fn to_toml(manifest: &Manifest) -> TomlManifest {
    let mut networks: BTreeMap<String, BTreeMap<String, TomlRecord>> = BTreeMap::new();
    for network in manifest.networks() {
        let units = manifest
            .network_records(network)
            .map(|r| (r.unit().to_string(), to_toml_record(r)))
            .collect();
        networks.insert(network.to_string(), units);
    }

    let history = manifest
        .history()
        .iter()
        .map(|r| {
            let t = to_toml_record(r);
            TomlHistoryEntry {
                network: r.network().to_string(),
                unit: r.unit().to_string(),
                chain_id: t.chain_id,
                address: t.address,
                tx_hash: t.tx_hash,
                artifact_hash: t.artifact_hash,
                block_number: t.block_number,
                deployed_at: t.deployed_at,
            }
        })
        .collect();

    TomlManifest {
        version: manifest.version(),
        networks,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn confirmed(unit: &str, network: &str, n: u64) -> DeploymentRecord {
        let mut record = DeploymentRecord::pending(
            unit,
            network,
            1337,
            TxHash::parse(&format!("0x{n:064x}")).unwrap(),
            ContentHash::from_bytes(unit.as_bytes()),
        );
        record
            .confirm(Address::parse(&format!("0x{n:040x}")).unwrap(), n)
            .unwrap();
        record
    }

    #[test]
    fn load_missing_returns_empty() {
        let dir = tempdir().unwrap();
        let repo = TomlManifestRepository::new(dir.path().join("deployments.toml"));

        let manifest = repo.load().unwrap();

        assert!(manifest.is_empty());
        assert_eq!(manifest.version(), 1);
    }

    #[test]
    fn append_persists_each_record() {
        let dir = tempdir().unwrap();
        let repo = TomlManifestRepository::new(dir.path().join("deployments.toml"));

        repo.append(&confirmed("DIDRegistry", "development", 1)).unwrap();
        repo.append(&confirmed("TrustRegistry", "development", 2)).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 2);
        let did = loaded.get("development", "DIDRegistry").unwrap();
        assert_eq!(
            did.address().unwrap().as_str(),
            "0x0000000000000000000000000000000000000001"
        );
        assert_eq!(did.block_number(), Some(1));
        assert!(did.is_confirmed());
        assert_eq!(loaded.history().len(), 2);
    }

    #[test]
    fn reload_preserves_records_exactly() {
        let dir = tempdir().unwrap();
        let repo = TomlManifestRepository::new(dir.path().join("deployments.toml"));
        let record = confirmed("CredentialAnchor", "sepolia", 7);

        repo.append(&record).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.get("sepolia", "CredentialAnchor"), Some(&record));
    }

    #[test]
    fn redeploy_supersedes_but_keeps_history() {
        let dir = tempdir().unwrap();
        let repo = TomlManifestRepository::new(dir.path().join("deployments.toml"));

        repo.append(&confirmed("DIDRegistry", "development", 1)).unwrap();
        repo.append(&confirmed("DIDRegistry", "development", 5)).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(
            loaded.get("development", "DIDRegistry").unwrap().block_number(),
            Some(5)
        );
        assert_eq!(loaded.history().len(), 2);
    }

    #[test]
    fn append_refuses_pending_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.toml");
        let repo = TomlManifestRepository::new(&path);
        let pending = DeploymentRecord::pending(
            "DIDRegistry",
            "development",
            1337,
            TxHash::parse(&format!("0x{:064x}", 1)).unwrap(),
            ContentHash::from_bytes(b"code"),
        );

        let err = repo.append(&pending).unwrap_err();

        assert!(matches!(err, ManifestError::Unconfirmed { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn corrupted_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.toml");
        fs::write(&path, "this is not toml = = =").unwrap();

        let err = TomlManifestRepository::new(&path).load().unwrap_err();

        assert!(matches!(err, ManifestError::ParseError(ref m) if m.contains("deployments.toml")));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.toml");
        fs::write(&path, "version = 2\n").unwrap();

        let err = TomlManifestRepository::new(&path).load().unwrap_err();

        assert_eq!(
            err,
            ManifestError::VersionMismatch {
                found: 2,
                expected: 1
            }
        );
    }

    #[test]
    fn invalid_address_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.toml");
        fs::write(
            &path,
            r#"version = 1

[networks.development.DIDRegistry]
chain_id = 1337
address = "not-an-address"
tx_hash = "0x0000000000000000000000000000000000000000000000000000000000000001"
artifact_hash = "sha256:00"
deployed_at = "2026-01-01T00:00:00Z"
"#,
        )
        .unwrap();

        let err = TomlManifestRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, ManifestError::ParseError(_)));
    }

    #[test]
    fn lock_file_sits_next_to_manifest() {
        let repo = TomlManifestRepository::new("/srv/app/deployments.toml");
        assert_eq!(
            repo.lock_path(),
            PathBuf::from("/srv/app/deployments.toml.lock")
        );
    }
}
