//! Domain Entities
//!
//! - `DeployableUnit` - one on-chain module to create
//! - `DeploymentPlan` - the ordered units of a single run
//! - `DeploymentRecord` - outcome of deploying one unit
//! - `Manifest` - durable (network, unit) -> record map

mod manifest;
mod plan;
mod record;
mod unit;

pub use manifest::Manifest;
pub use plan::{DeploymentPlan, PlanError, CREDENTIAL_MODULES};
pub use record::{ConfirmationStatus, DeploymentRecord, TransitionError};
pub use unit::DeployableUnit;
