//! Status Use Case
//!
//! Reports, per unit of a plan, what the manifest records for one network and
//! whether the local artifact has drifted since. Never talks to the ledger.

use crate::domain::entities::{DeploymentPlan, DeploymentRecord};
use crate::domain::ports::{ArtifactSource, ManifestRepository};
use crate::error::ProvisionResult;

/// Deployment state of one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitState {
    NotDeployed,
    Deployed {
        record: DeploymentRecord,
        /// `None` when the artifact could not be read locally
        artifact_changed: Option<bool>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitStatus {
    pub unit: String,
    pub state: UnitState,
}

impl UnitStatus {
    pub fn record(&self) -> Option<&DeploymentRecord> {
        match &self.state {
            UnitState::Deployed { record, .. } => Some(record),
            UnitState::NotDeployed => None,
        }
    }

    pub fn is_deployed(&self) -> bool {
        self.record().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub network: String,
    pub units: Vec<UnitStatus>,
}

impl StatusReport {
    pub fn deployed_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_deployed()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.units.len() - self.deployed_count()
    }

    /// Every unit is recorded and none has a changed artifact.
    pub fn is_up_to_date(&self) -> bool {
        self.units.iter().all(|u| match &u.state {
            UnitState::Deployed {
                artifact_changed, ..
            } => *artifact_changed != Some(true),
            UnitState::NotDeployed => false,
        })
    }
}

pub struct StatusUseCase<M, A>
where
    M: ManifestRepository,
    A: ArtifactSource,
{
    manifest_repo: M,
    artifacts: A,
}

impl<M, A> StatusUseCase<M, A>
where
    M: ManifestRepository,
    A: ArtifactSource,
{
    pub fn new(manifest_repo: M, artifacts: A) -> Self {
        Self {
            manifest_repo,
            artifacts,
        }
    }

    pub fn run(&self, plan: &DeploymentPlan, network: &str) -> ProvisionResult<StatusReport> {
        let manifest = self.manifest_repo.load()?;

        let units = plan
            .iter()
            .map(|unit| {
                let state = match manifest.get(network, unit.name()) {
                    None => UnitState::NotDeployed,
                    Some(record) => {
                        let artifact_changed = self
                            .artifacts
                            .load(unit)
                            .ok()
                            .map(|artifact| artifact.content_hash(unit) != *record.artifact_hash());
                        UnitState::Deployed {
                            record: record.clone(),
                            artifact_changed,
                        }
                    }
                };
                UnitStatus {
                    unit: unit.name().to_string(),
                    state,
                }
            })
            .collect();

        Ok(StatusReport {
            network: network.to_string(),
            units,
        })
    }
}
