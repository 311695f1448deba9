//! Ledger Implementations
//!
//! Concrete implementations of the LedgerConnection port.

mod json_rpc;

pub use json_rpc::{JsonRpcConfig, JsonRpcLedger};
