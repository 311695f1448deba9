//! Configuration warning value object.

use std::path::PathBuf;

/// Unknown key found while loading `provisioner.toml`. Loading still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Last segment of the unknown key's path
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line of the first occurrence, if found
    pub line: Option<usize>,
    /// Closest known key, when one is near enough
    pub suggestion: Option<String>,
}
