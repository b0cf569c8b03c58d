//! Ticket issuance and the state-guarded document store.

mod config;
mod generator;
mod memory_store;
mod store;
mod types;

pub use config::{ReplacePolicy, StoreConfig};
pub use generator::TicketGenerator;
pub use memory_store::InMemoryTicketStore;
pub use store::{CommitError, TicketStore};
pub use types::{StoreStats, Ticket};
