//! In-memory ticket store backed by a sharded concurrent map.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

use super::store::validate_transition;
use super::{
    CommitError, ReplacePolicy, StoreConfig, StoreStats, Ticket, TicketGenerator, TicketStore,
};
use crate::document::{Document, Watermark};

/// Ticket store that lives for the lifetime of the process.
///
/// Documents are held behind `Arc`, so readers clone a pointer instead of the
/// document and never see a half-replaced value.
#[derive(Debug)]
pub struct InMemoryTicketStore {
    documents: DashMap<Ticket, Arc<Document>>,
    generator: TicketGenerator,
    policy: ReplacePolicy,
}

impl Default for InMemoryTicketStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl InMemoryTicketStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            documents: DashMap::new(),
            generator: TicketGenerator::new(),
            policy: config.replace_policy,
        }
    }

    pub fn policy(&self) -> ReplacePolicy {
        self.policy
    }

    /// Store first, validate after. The entry is replaced even when the
    /// transition turns out to be invalid.
    fn overwrite(&self, ticket: Ticket, document: Document) -> Result<(), CommitError> {
        let next = Arc::new(document);
        let previous = self.documents.insert(ticket, Arc::clone(&next));
        validate_transition(ticket, previous.as_deref(), &next)
    }

    /// Validate and write under the shard lock; nothing is written on failure.
    fn compare_and_swap(&self, ticket: Ticket, document: Document) -> Result<(), CommitError> {
        match self.documents.get_mut(&ticket) {
            Some(mut entry) => {
                validate_transition(ticket, Some(&**entry.value()), &document)?;
                *entry = Arc::new(document);
                Ok(())
            }
            None => validate_transition(ticket, None, &document),
        }
    }
}

impl TicketStore for InMemoryTicketStore {
    fn create_ticket_for(&self, document: Document) -> Ticket {
        let ticket = self.generator.next();
        info!("Creating ticket {} for document {}", ticket, document);
        self.documents.insert(ticket, Arc::new(document));
        ticket
    }

    fn replace_if_valid(&self, ticket: Ticket, document: Document) -> Result<(), CommitError> {
        match self.policy {
            ReplacePolicy::Overwrite => self.overwrite(ticket, document),
            ReplacePolicy::CompareAndSwap => self.compare_and_swap(ticket, document),
        }
    }

    fn watermark_for(&self, ticket: Ticket) -> Option<Watermark> {
        self.documents
            .get(&ticket)
            .and_then(|entry| entry.watermark().cloned())
    }

    fn get(&self, ticket: Ticket) -> Option<Arc<Document>> {
        self.documents.get(&ticket).map(|entry| Arc::clone(entry.value()))
    }

    fn len(&self) -> usize {
        self.documents.len()
    }

    fn stats(&self) -> StoreStats {
        let total = self.documents.len();
        let watermarked = self
            .documents
            .iter()
            .filter(|entry| entry.is_watermarked())
            .count();
        StoreStats {
            total,
            watermarked,
            pending: total.saturating_sub(watermarked),
        }
    }
}
