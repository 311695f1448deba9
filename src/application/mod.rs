//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Sequential, idempotent deployment of a plan
//! - `StatusUseCase` - What the manifest says about each unit of a plan
//! - `EnvExport` - Render recorded addresses into a dotenv file
//! - `AbiExportUseCase` - Publish build artifacts (ABIs) for consumers

pub mod abis;
pub mod deploy;
pub mod export;
pub mod status;

pub use abis::{AbiExportReport, AbiExportUseCase};
pub use deploy::{DeployOptions, DeployReport, DeployUseCase, RetryPolicy, UnitOutcome};
pub use export::EnvExport;
pub use status::{StatusReport, StatusUseCase, UnitState, UnitStatus};
