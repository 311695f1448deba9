//! Common test utilities for provisioner CLI tests.
//!
//! This module provides:
//! - `FakeNode`: a minimal Ethereum JSON-RPC endpoint on a local port
//! - `TestEnv`: a temp project with artifacts and a `provisioner.toml`

#![allow(dead_code)]

pub mod env;
pub mod node;

pub use env::*;
pub use node::*;
