//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic local file writes
//! - `ledger/` - JSON-RPC ledger connection
//! - `repositories/` - Manifest and artifact repositories
//! - `events/` - Console and NDJSON event sinks

pub mod events;
pub mod fs;
pub mod ledger;
pub mod repositories;

pub use events::{ConsoleEventSink, JsonEventSink};
pub use ledger::{JsonRpcConfig, JsonRpcLedger};
pub use repositories::{JsonArtifactRepository, TomlManifestRepository};
