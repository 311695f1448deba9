//! ManifestRepository port - persistence for the deployment manifest
//!
//! Lets the sequencer read the manifest for its idempotence check and
//! publish each confirmed record as soon as it exists, without knowing
//! about the on-disk format.

use thiserror::Error;

use crate::domain::entities::{DeploymentRecord, Manifest};

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// Manifest file exists but cannot be parsed
    #[error("invalid manifest format: {0}")]
    ParseError(String),

    /// Manifest was written by an incompatible version
    #[error("manifest format incompatible (found version {found}, expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    /// Only confirmed records may be persisted
    #[error("refusing to record unconfirmed deployment of {unit}")]
    Unconfirmed { unit: String },

    /// I/O or locking failure
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Abstract repository for the deployment manifest.
pub trait ManifestRepository {
    /// Load the manifest, or an empty one if none has been written yet
    fn load(&self) -> ManifestResult<Manifest>;

    /// Add one confirmed record (load-modify-save, serialized against
    /// concurrent writers)
    fn append(&self, record: &DeploymentRecord) -> ManifestResult<()>;
}
