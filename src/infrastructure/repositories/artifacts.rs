//! JSON Artifact Repository
//!
//! Reads compiled contract artifacts (build output with `abi` and `bytecode`)
//! from an artifacts directory, and publishes them unchanged to consumers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::DeployableUnit;
use crate::domain::ports::{ArtifactError, ArtifactPublisher, ArtifactSource, CompiledArtifact};
use crate::infrastructure::fs::atomic_write;

/// Fields of a build artifact that deployment needs; everything else is
/// ignored.
#[derive(Debug, Deserialize)]
struct ArtifactFile {
    #[serde(default)]
    bytecode: Option<String>,
}

pub struct JsonArtifactRepository {
    root: PathBuf,
}

impl JsonArtifactRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSource for JsonArtifactRepository {
    fn load(&self, unit: &DeployableUnit) -> Result<CompiledArtifact, ArtifactError> {
        let path = self.root.join(unit.artifact());
        let invalid = |message: String| ArtifactError::Invalid {
            path: path.clone(),
            message,
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ArtifactError::NotFound { path });
            }
            Err(e) => return Err(invalid(e.to_string())),
        };

        let file: ArtifactFile =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        let bytecode = decode_bytecode(file.bytecode.as_deref().unwrap_or("")).map_err(invalid)?;

        Ok(CompiledArtifact { path, bytecode })
    }
}

impl ArtifactPublisher for JsonArtifactRepository {
    fn publish(&self, unit: &DeployableUnit, dest_dir: &Path) -> Result<PathBuf, ArtifactError> {
        // Refuse to hand out artifacts that could not be deployed either.
        let artifact = self.load(unit)?;
        let content = fs::read(&artifact.path).map_err(|e| ArtifactError::Invalid {
            path: artifact.path.clone(),
            message: e.to_string(),
        })?;

        let file_name = artifact
            .path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", unit.name())));
        let dest = dest_dir.join(file_name);
        atomic_write(&dest, &content).map_err(|e| ArtifactError::Write {
            path: dest.clone(),
            message: e.to_string(),
        })?;
        Ok(dest)
    }
}

fn decode_bytecode(raw: &str) -> Result<Vec<u8>, String> {
    let hex_str = raw.trim();
    let hex_str = hex_str
        .strip_prefix("0x")
        .or_else(|| hex_str.strip_prefix("0X"))
        .unwrap_or(hex_str);

    if hex_str.is_empty() {
        return Err("bytecode is empty (abstract contract or interface?)".to_string());
    }
    // Unresolved library references look like `__LibName_____...`.
    if hex_str.contains("__") {
        return Err("bytecode has unlinked library placeholders".to_string());
    }
    hex::decode(hex_str).map_err(|e| format!("bytecode is not valid hex: {e}"))
}
