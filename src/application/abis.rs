//! ABI Export
//!
//! Publishes the build artifact of every plan unit to the directory an
//! application loads contract ABIs from. A unit without a build artifact is
//! reported and skipped; an artifact that exists but is unusable stops the
//! export.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::entities::DeploymentPlan;
use crate::domain::ports::{ArtifactError, ArtifactPublisher};
use crate::error::{ProvisionError, ProvisionResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbiExportReport {
    /// `(unit, written file)` in plan order
    pub published: Vec<(String, PathBuf)>,
    /// Units with no build artifact
    pub missing: Vec<String>,
}

impl AbiExportReport {
    pub fn published_count(&self) -> usize {
        self.published.len()
    }
}

pub struct AbiExportUseCase<P: ArtifactPublisher> {
    publisher: P,
}

impl<P: ArtifactPublisher> AbiExportUseCase<P> {
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    pub fn run(&self, plan: &DeploymentPlan, dest_dir: &Path) -> ProvisionResult<AbiExportReport> {
        let mut report = AbiExportReport::default();

        for unit in plan.iter() {
            match self.publisher.publish(unit, dest_dir) {
                Ok(path) => {
                    info!(unit = unit.name(), path = %path.display(), "artifact published");
                    report.published.push((unit.name().to_string(), path));
                }
                Err(ArtifactError::NotFound { path }) => {
                    warn!(unit = unit.name(), path = %path.display(), "no build artifact");
                    report.missing.push(unit.name().to_string());
                }
                Err(source) => {
                    return Err(ProvisionError::ArtifactExport {
                        unit: unit.name().to_string(),
                        source,
                    })
                }
            }
        }

        if report.published.is_empty() {
            return Err(ProvisionError::NoArtifacts {
                dir: dest_dir.to_path_buf(),
            });
        }
        Ok(report)
    }
}
