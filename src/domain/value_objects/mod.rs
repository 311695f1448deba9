//! Domain Value Objects
//!
//! Immutable, validated values shared by the entities and ports.

mod address;
mod config_warning;
mod hash;
mod tx_hash;

use thiserror::Error;

pub use address::Address;
pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use tx_hash::TxHash;

/// A string that does not parse as the expected ledger value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("invalid address '{0}': expected 0x followed by 40 hex digits")]
    Address(String),

    #[error("invalid transaction hash '{0}': expected 0x followed by 64 hex digits")]
    TxHash(String),
}

/// Check `0x` + exactly `digits` hex characters, returning the lowercase form.
fn normalize_hex(raw: &str, digits: usize) -> Option<String> {
    let body = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
    if body.len() != digits || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("0x{}", body.to_ascii_lowercase()))
}
