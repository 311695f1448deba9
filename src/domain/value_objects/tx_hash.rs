//! Transaction identifier

use std::fmt;

use super::{normalize_hex, ValueError};

/// A 32-byte transaction hash, lowercase `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(String);

impl TxHash {
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        normalize_hex(raw.trim(), 64)
            .map(Self)
            .ok_or_else(|| ValueError::TxHash(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
