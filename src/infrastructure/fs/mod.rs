//! File System Helpers
//!
//! Local disk primitives shared by the repositories and the CLI.

mod local;

pub use local::{atomic_write, read_optional};
