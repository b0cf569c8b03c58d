//! Configuration for the ticket store.

use serde::{Deserialize, Serialize};

/// How the store treats a commit that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacePolicy {
    /// Write the new document first, then report whether the transition was
    /// valid. A rejected commit still replaces the stored entry.
    Overwrite,
    /// Only write when the transition is valid. A rejected commit leaves the
    /// stored entry untouched.
    #[default]
    CompareAndSwap,
}

/// Ticket store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub replace_policy: ReplacePolicy,
}

impl StoreConfig {
    pub fn with_replace_policy(mut self, policy: ReplacePolicy) -> Self {
        self.replace_policy = policy;
        self
    }
}
