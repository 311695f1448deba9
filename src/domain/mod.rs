//! Domain Layer
//!
//! Deployment concepts without I/O.
//!
//! ## Structure
//!
//! - `entities/` - DeployableUnit, DeploymentPlan, DeploymentRecord, Manifest
//! - `value_objects/` - Address, TxHash, ContentHash
//! - `ports/` - Interfaces implemented by the infrastructure layer
//!
//! Ledger access, artifact loading and manifest persistence all go through
//! the traits in `ports`, so the sequencing logic runs against fakes in tests.

pub mod entities;
pub mod ports;
pub mod value_objects;
