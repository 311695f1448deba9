//! Deployment record entity
//!
//! A record is created when the creation transaction is accepted by the node
//! (status `Pending`) and moves exactly once, to `Confirmed` or `Failed`.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::value_objects::{Address, ContentHash, TxHash};

/// Confirmation lifecycle of a deployment transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Pending,
    Confirmed,
    Failed,
}

impl ConfirmationStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ConfirmationStatus::Pending)
    }
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfirmationStatus::Pending => "pending",
            ConfirmationStatus::Confirmed => "confirmed",
            ConfirmationStatus::Failed => "failed",
        })
    }
}

/// Attempted status change that the lifecycle does not allow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("deployment record for {unit} cannot move from {from} to {to}")]
pub struct TransitionError {
    pub unit: String,
    pub from: ConfirmationStatus,
    pub to: ConfirmationStatus,
}

/// Outcome of deploying one unit to one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
    unit: String,
    network: String,
    chain_id: u64,
    tx_hash: TxHash,
    artifact_hash: ContentHash,
    status: ConfirmationStatus,
    address: Option<Address>,
    block_number: Option<u64>,
    deployed_at: DateTime<Utc>,
}

impl DeploymentRecord {
    /// A freshly submitted deployment
    pub fn pending(
        unit: impl Into<String>,
        network: impl Into<String>,
        chain_id: u64,
        tx_hash: TxHash,
        artifact_hash: ContentHash,
    ) -> Self {
        Self {
            unit: unit.into(),
            network: network.into(),
            chain_id,
            tx_hash,
            artifact_hash,
            status: ConfirmationStatus::Pending,
            address: None,
            block_number: None,
            deployed_at: Utc::now(),
        }
    }

    /// Rebuild a confirmed record read back from storage
    #[allow(clippy::too_many_arguments)]
    pub fn restored(
        unit: impl Into<String>,
        network: impl Into<String>,
        chain_id: u64,
        tx_hash: TxHash,
        artifact_hash: ContentHash,
        address: Address,
        block_number: Option<u64>,
        deployed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            unit: unit.into(),
            network: network.into(),
            chain_id,
            tx_hash,
            artifact_hash,
            status: ConfirmationStatus::Confirmed,
            address: Some(address),
            block_number,
            deployed_at,
        }
    }

    /// `Pending -> Confirmed`, binding the contract address
    pub fn confirm(&mut self, address: Address, block_number: u64) -> Result<(), TransitionError> {
        self.transition(ConfirmationStatus::Confirmed)?;
        self.address = Some(address);
        self.block_number = Some(block_number);
        Ok(())
    }

    /// `Pending -> Failed`
    pub fn fail(&mut self) -> Result<(), TransitionError> {
        self.transition(ConfirmationStatus::Failed)
    }

    fn transition(&mut self, to: ConfirmationStatus) -> Result<(), TransitionError> {
        if self.status.is_terminal() {
            return Err(TransitionError {
                unit: self.unit.clone(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    pub fn artifact_hash(&self) -> &ContentHash {
        &self.artifact_hash
    }

    pub fn status(&self) -> ConfirmationStatus {
        self.status
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ConfirmationStatus::Confirmed
    }

    /// Contract address; `None` until confirmed
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    pub fn deployed_at(&self) -> DateTime<Utc> {
        self.deployed_at
    }
}
