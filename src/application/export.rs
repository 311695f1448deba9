//! Environment export
//!
//! Turns the confirmed deployments of one network into dotenv assignments
//! and merges them into existing dotenv content. File I/O is left to the
//! caller.

use crate::domain::entities::{DeploymentPlan, Manifest};
use crate::error::{ProvisionError, ProvisionResult};

pub const RPC_URL_KEY: &str = "BLOCKCHAIN_RPC_URL";
pub const NETWORK_KEY: &str = "BLOCKCHAIN_NETWORK";

/// Ordered `KEY=value` assignments for one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvExport {
    network: String,
    vars: Vec<(String, String)>,
}

impl EnvExport {
    /// Collect addresses for `network`: plan units first, in plan order,
    /// then any other unit the manifest records for that network.
    pub fn from_manifest(
        manifest: &Manifest,
        plan: &DeploymentPlan,
        network: &str,
        rpc_url: &str,
    ) -> ProvisionResult<Self> {
        let mut vars = Vec::new();

        let planned = plan
            .names()
            .filter_map(|name| manifest.get(network, name));
        let unplanned = manifest
            .network_records(network)
            .filter(|record| plan.get(record.unit()).is_none());

        for record in planned.chain(unplanned) {
            if let Some(address) = record.address() {
                vars.push((address_key(record.unit()), address.to_string()));
            }
        }

        if vars.is_empty() {
            return Err(ProvisionError::NothingToExport {
                network: network.to_string(),
            });
        }

        vars.push((RPC_URL_KEY.to_string(), rpc_url.to_string()));
        vars.push((NETWORK_KEY.to_string(), network.to_string()));

        Ok(Self {
            network: network.to_string(),
            vars,
        })
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }

    /// Number of contract addresses exported
    pub fn address_count(&self) -> usize {
        self.vars.len() - 2
    }

    /// Merge into existing dotenv content.
    ///
    /// A line starting with `KEY=` is replaced in place (first occurrence);
    /// missing keys are appended. Every other line is kept verbatim.
    pub fn render(&self, existing: &str) -> String {
        let mut lines: Vec<String> = existing.lines().map(str::to_string).collect();

        for (key, value) in &self.vars {
            let assignment = format!("{key}={value}");
            let prefix = format!("{key}=");
            match lines.iter_mut().find(|line| line.starts_with(&prefix)) {
                Some(line) => *line = assignment,
                None => lines.push(assignment),
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// `TrustRegistry` -> `TRUSTREGISTRY_ADDRESS`
pub fn address_key(unit: &str) -> String {
    format!("{}_ADDRESS", unit.to_ascii_uppercase())
}
