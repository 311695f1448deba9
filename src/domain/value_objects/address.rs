//! Ledger account address

use std::fmt;
use std::str::FromStr;

use super::{normalize_hex, ValueError};

/// A 20-byte account address, stored as lowercase `0x`-prefixed hex.
///
/// Checksummed (mixed-case) input is accepted; the checksum itself is not
/// verified, only the shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        normalize_hex(raw.trim(), 40)
            .map(Self)
            .ok_or_else(|| ValueError::Address(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
