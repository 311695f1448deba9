//! Deploy Module
//!
//! Orchestrates the deployment of a plan onto one network.
//!
//! ## Structure
//!
//! - `options` - Per-run settings (`DeployOptions`)
//! - `retry` - Bounded backoff for transient ledger errors (`RetryPolicy`)
//! - `result` - Per-unit outcomes (`DeployReport`, `UnitOutcome`)
//! - `use_case` - The sequencer itself (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use provisioner::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(ledger, manifest_repo, artifacts);
//! let report = use_case.run(&plan, &DeployOptions::new("development"))?;
//! ```

mod options;
mod result;
mod retry;
mod use_case;

pub use options::DeployOptions;
pub use result::{DeployReport, UnitOutcome};
pub use retry::RetryPolicy;
pub use use_case::DeployUseCase;
