//! Property tests for provisioner.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/plan.rs"]
mod plan;

#[path = "properties/manifest.rs"]
mod manifest;

#[path = "properties/dotenv.rs"]
mod dotenv;
