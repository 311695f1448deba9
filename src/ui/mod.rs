//! Terminal rendering for the CLI

pub mod output;
