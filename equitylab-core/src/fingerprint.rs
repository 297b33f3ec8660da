//! Deterministic identity for a cap table configuration.
//!
//! The hash covers every field of the table (classes in order), so any change
//! to shares, terms, or the option grant produces a new fingerprint.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::CapTable;

/// BLAKE3 hex digest of a cap table's canonical JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapTableHash(pub String);

impl CapTableHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// First `n` hex characters, for directory names and display.
    pub fn short(&self, n: usize) -> &str {
        &self.0[..n.min(self.0.len())]
    }
}

impl fmt::Display for CapTableHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fingerprint a cap table. Struct fields serialize in declaration order,
/// so the JSON is canonical.
pub fn fingerprint(table: &CapTable) -> Result<CapTableHash, serde_json::Error> {
    let json = serde_json::to_vec(table)?;
    Ok(CapTableHash::from_bytes(&json))
}
