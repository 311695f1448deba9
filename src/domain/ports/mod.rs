//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_source;
pub mod deploy_events;
pub mod ledger;
pub mod manifest_repository;

pub use artifact_source::{ArtifactError, ArtifactPublisher, ArtifactSource, CompiledArtifact};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use ledger::{CreationTx, LedgerConnection, LedgerError, LedgerResult, Receipt};
pub use manifest_repository::{ManifestError, ManifestRepository, ManifestResult};
