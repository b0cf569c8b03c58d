//! Core ticket data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle returned at submission time and used to fetch the watermark later.
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(u64);

impl Ticket {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Ticket {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of store contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Tickets issued and stored.
    pub total: usize,
    /// Tickets whose document carries a watermark.
    pub watermarked: usize,
    /// Tickets still waiting for a watermark.
    pub pending: usize,
}
