//! Ticket storage trait and types.

use std::fmt;
use std::sync::Arc;

use crate::document::{Document, Watermark};
use crate::ticket::{StoreStats, Ticket};

/// Why a watermarked document could not be committed for a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitError {
    /// No document was stored for the ticket.
    UnknownTicket(Ticket),
    /// The stored document already carries a watermark.
    AlreadyWatermarked(Ticket),
    /// The document being committed has no watermark.
    NotWatermarked(Ticket),
}

impl CommitError {
    /// Short label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            CommitError::UnknownTicket(_) => "unknown_ticket",
            CommitError::AlreadyWatermarked(_) => "already_watermarked",
            CommitError::NotWatermarked(_) => "not_watermarked",
        }
    }
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::UnknownTicket(t) => {
                write!(f, "Ticket {} is not associated with any document", t)
            }
            CommitError::AlreadyWatermarked(t) => {
                write!(f, "Document for ticket {} is already watermarked", t)
            }
            CommitError::NotWatermarked(t) => {
                write!(f, "Document committed for ticket {} carries no watermark", t)
            }
        }
    }
}

impl std::error::Error for CommitError {}

/// Storage for ticket-to-document associations.
///
/// Every mutation goes through `create_ticket_for` and `replace_if_valid`;
/// documents are replaced wholesale, never edited in place.
pub trait TicketStore: Send + Sync {
    /// Issue a fresh ticket and store `document` under it.
    fn create_ticket_for(&self, document: Document) -> Ticket;

    /// Move the document for `ticket` from unwatermarked to watermarked.
    ///
    /// Succeeds only if a document is stored for the ticket, that document
    /// has no watermark yet, and `document` has one.
    fn replace_if_valid(&self, ticket: Ticket, document: Document) -> Result<(), CommitError>;

    /// The watermark for `ticket`, or `None` when the ticket is unknown or
    /// not processed yet.
    fn watermark_for(&self, ticket: Ticket) -> Option<Watermark>;

    /// The document currently stored for `ticket`.
    fn get(&self, ticket: Ticket) -> Option<Arc<Document>>;

    /// Number of stored tickets.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> StoreStats;
}

/// Checks the unwatermarked -> watermarked transition.
pub(crate) fn validate_transition(
    ticket: Ticket,
    previous: Option<&Document>,
    next: &Document,
) -> Result<(), CommitError> {
    let Some(previous) = previous else {
        tracing::warn!(%ticket, "Attempting to store a document for a ticket with no document");
        return Err(CommitError::UnknownTicket(ticket));
    };
    if previous.is_watermarked() {
        tracing::warn!(%ticket, "Attempting to store a document for a ticket that is already watermarked");
        return Err(CommitError::AlreadyWatermarked(ticket));
    }
    if !next.is_watermarked() {
        tracing::warn!(%ticket, "Attempting to store a document without a watermark");
        return Err(CommitError::NotWatermarked(ticket));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Author, Topic};

    fn plain() -> Document {
        Document::book("Earth", Author::new("Ikaro", "EStinmpoutsm"), Topic::Media)
    }

    fn stamped() -> Document {
        let doc = plain();
        doc.with_watermark(Watermark::create_for(&doc))
    }

    #[test]
    fn test_validate_transition() {
        let t = Ticket::new(1);
        assert_eq!(validate_transition(t, Some(&plain()), &stamped()), Ok(()));
        assert_eq!(
            validate_transition(t, None, &stamped()),
            Err(CommitError::UnknownTicket(t))
        );
        assert_eq!(
            validate_transition(t, Some(&stamped()), &stamped()),
            Err(CommitError::AlreadyWatermarked(t))
        );
        assert_eq!(
            validate_transition(t, Some(&plain()), &plain()),
            Err(CommitError::NotWatermarked(t))
        );
    }

    #[test]
    fn test_commit_error_display() {
        let err = CommitError::AlreadyWatermarked(Ticket::new(4));
        assert_eq!(err.to_string(), "Document for ticket 4 is already watermarked");
        assert_eq!(err.reason(), "already_watermarked");
    }
}
