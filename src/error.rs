//! Error types for the provisioner
//!
//! Library code returns [`ProvisionError`]; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::entities::{PlanError, TransitionError};
use crate::domain::ports::{ArtifactError, ManifestError};
use crate::domain::value_objects::TxHash;

/// Result type alias for provisioner operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Why a single unit's deployment did not reach a confirmed state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The creation transaction was mined but reverted
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },

    /// No confirmation arrived within the configured window
    #[error("no confirmation for transaction {tx_hash} after {}s", waited.as_secs())]
    Timeout { tx_hash: TxHash, waited: Duration },

    /// The node refused the transaction (insufficient funds, bad sender, ...)
    #[error("ledger rejected the transaction: {0}")]
    Rejected(String),

    /// The ledger could not be reached reliably; retries were exhausted
    #[error("transport failure: {0}")]
    Transport(String),

    /// A mined, successful receipt that carries no contract address
    #[error("receipt for {tx_hash} carries no contract address")]
    NoContractAddress { tx_hash: TxHash },

    /// The compiled artifact could not be loaded
    #[error("artifact unusable: {0}")]
    Artifact(String),
}

impl FailureCause {
    /// Short machine-readable tag used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            FailureCause::Reverted { .. } => "reverted",
            FailureCause::Timeout { .. } => "timeout",
            FailureCause::Rejected(_) => "rejected",
            FailureCause::Transport(_) => "transport",
            FailureCause::NoContractAddress { .. } => "no_contract_address",
            FailureCause::Artifact(_) => "artifact",
        }
    }
}

/// Main error type for provisioner operations
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The target ledger cannot be reached; nothing was deployed
    #[error("cannot reach ledger '{network}': {message}")]
    Connection { network: String, message: String },

    /// A unit failed; earlier confirmed units stay recorded
    #[error("deployment of {unit} failed: {cause}")]
    DeploymentFailed { unit: String, cause: FailureCause },

    /// The run was interrupted before `unit` resolved
    #[error("interrupted before {unit} was confirmed")]
    Interrupted { unit: String },

    /// The deployment plan violates its invariants
    #[error("invalid deployment plan: {0}")]
    InvalidPlan(#[from] PlanError),

    /// A deployment record was driven through an illegal status change
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// Manifest could not be read or written
    #[error("deployment manifest: {0}")]
    Manifest(#[from] ManifestError),

    /// Configuration file is malformed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// The requested network is not configured
    #[error("unknown network '{name}' (configured: {known})")]
    UnknownNetwork { name: String, known: String },

    /// Nothing recorded for the network, so there is nothing to export
    #[error("no confirmed deployments recorded for network '{network}'")]
    NothingToExport { network: String },

    /// A unit's artifact exists but cannot be published
    #[error("cannot export artifact of {unit}: {source}")]
    ArtifactExport {
        unit: String,
        #[source]
        source: ArtifactError,
    },

    /// No unit of the plan has a build artifact
    #[error("no build artifacts to publish to {}", dir.display())]
    NoArtifacts { dir: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProvisionError {
    /// Name of the unit the error is attributed to, if any.
    pub fn unit(&self) -> Option<&str> {
        match self {
            ProvisionError::DeploymentFailed { unit, .. }
            | ProvisionError::Interrupted { unit }
            | ProvisionError::ArtifactExport { unit, .. } => Some(unit),
            _ => None,
        }
    }
}
