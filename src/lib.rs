//! Provisioner - ordered, idempotent contract deployment
//!
//! Deploys a plan of on-chain modules (by default the credential ledger's
//! DIDRegistry, TrustRegistry, CredentialAnchor and RevocationRegistry) one
//! at a time, records each confirmed deployment in a manifest, and skips
//! whatever the manifest already holds on the next run.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{DeployOptions, DeployReport, DeployUseCase, RetryPolicy, UnitOutcome};
pub use config::Config;
pub use domain::entities::{DeployableUnit, DeploymentPlan, DeploymentRecord, Manifest};
pub use error::{FailureCause, ProvisionError, ProvisionResult};
