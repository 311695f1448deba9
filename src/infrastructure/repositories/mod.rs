//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod artifacts;
mod manifest;

pub use artifacts::JsonArtifactRepository;
pub use manifest::TomlManifestRepository;
