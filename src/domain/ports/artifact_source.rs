//! ArtifactSource port - where compiled units come from
//!
//! Artifacts are produced by the contract build; this side only reads them.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::DeployableUnit;
use crate::domain::value_objects::ContentHash;

/// Artifact loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid artifact {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("cannot write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

/// Creation bytecode of one compiled unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    pub path: PathBuf,
    pub bytecode: Vec<u8>,
}

impl CompiledArtifact {
    /// Payload of the creation transaction: bytecode, then constructor args.
    pub fn creation_data(&self, unit: &DeployableUnit) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.bytecode.len() + unit.constructor_args().len());
        data.extend_from_slice(&self.bytecode);
        data.extend_from_slice(unit.constructor_args());
        data
    }

    /// Fingerprint recorded with the deployment
    pub fn content_hash(&self, unit: &DeployableUnit) -> ContentHash {
        ContentHash::from_bytes(&self.creation_data(unit))
    }
}

pub trait ArtifactSource {
    fn load(&self, unit: &DeployableUnit) -> Result<CompiledArtifact, ArtifactError>;
}

/// Hands build artifacts (ABI included) to applications that call the
/// deployed modules.
pub trait ArtifactPublisher {
    /// Copy `unit`'s artifact into `dest_dir`; returns the written file.
    fn publish(&self, unit: &DeployableUnit, dest_dir: &Path) -> Result<PathBuf, ArtifactError>;
}
