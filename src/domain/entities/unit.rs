//! Deployable unit entity

use std::path::{Path, PathBuf};

use super::plan::PlanError;

/// One on-chain module: a name, the compiled artifact it is built from, and
/// the (already ABI-encoded) constructor arguments appended to its bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployableUnit {
    name: String,
    artifact: PathBuf,
    constructor_args: Vec<u8>,
}

impl DeployableUnit {
    /// Create a unit whose artifact is `<name>.json` and that takes no
    /// constructor arguments.
    pub fn new(name: impl Into<String>) -> Result<Self, PlanError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(PlanError::InvalidName { name });
        }
        let artifact = PathBuf::from(format!("{name}.json"));
        Ok(Self {
            name,
            artifact,
            constructor_args: Vec::new(),
        })
    }

    pub fn with_artifact(mut self, artifact: impl Into<PathBuf>) -> Self {
        self.artifact = artifact.into();
        self
    }

    pub fn with_constructor_args(mut self, args: Vec<u8>) -> Self {
        self.constructor_args = args;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Artifact path, relative to the artifacts directory
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    pub fn constructor_args(&self) -> &[u8] {
        &self.constructor_args
    }
}

/// Names double as manifest keys and env-var stems, so keep them plain.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
