//! Manifest entity - durable record of confirmed deployments
//!
//! Keyed by network name, then unit name. Holds only the latest confirmed
//! record per key for lookups, plus an append-only history of every record
//! that was ever confirmed. I/O lives in `ManifestRepository`.

use std::collections::BTreeMap;

use crate::domain::ports::ManifestError;

use super::DeploymentRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    version: u32,
    networks: BTreeMap<String, BTreeMap<String, DeploymentRecord>>,
    history: Vec<DeploymentRecord>,
}

impl Manifest {
    /// Current on-disk format version
    pub const VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            networks: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Number of (network, unit) entries
    pub fn len(&self) -> usize {
        self.networks.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Latest confirmed record for `unit` on `network`
    pub fn get(&self, network: &str, unit: &str) -> Option<&DeploymentRecord> {
        self.networks.get(network).and_then(|units| units.get(unit))
    }

    pub fn is_deployed(&self, network: &str, unit: &str) -> bool {
        self.get(network, unit).is_some()
    }

    /// Record a confirmed deployment, superseding any earlier entry for the
    /// same key. Pending or failed records are refused.
    pub fn record(&mut self, record: DeploymentRecord) -> Result<(), ManifestError> {
        if !record.is_confirmed() || record.address().is_none() {
            return Err(ManifestError::Unconfirmed {
                unit: record.unit().to_string(),
            });
        }
        self.history.push(record.clone());
        self.insert_latest(record);
        Ok(())
    }

    /// Records for one network, ordered by unit name
    pub fn network_records(&self, network: &str) -> impl Iterator<Item = &DeploymentRecord> {
        self.networks
            .get(network)
            .into_iter()
            .flat_map(|units| units.values())
    }

    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    /// Every confirmed record, oldest first
    pub fn history(&self) -> &[DeploymentRecord] {
        &self.history
    }

    pub(crate) fn insert_latest(&mut self, record: DeploymentRecord) {
        self.networks
            .entry(record.network().to_string())
            .or_default()
            .insert(record.unit().to_string(), record);
    }

    pub(crate) fn push_history(&mut self, record: DeploymentRecord) {
        self.history.push(record);
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}
