use std::sync::atomic::{AtomicU64, Ordering};

use super::Ticket;

/// Issues strictly increasing tickets starting at 1.
///
/// A single `fetch_add` both reserves and returns the value, so concurrent
/// callers can never observe the same ticket. Overflow is not handled.
#[derive(Debug, Default)]
pub struct TicketGenerator {
    last: AtomicU64,
}

impl TicketGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> Ticket {
        Ticket::new(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The most recently issued ticket, if any.
    pub fn last_issued(&self) -> Option<Ticket> {
        match self.last.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket::new(n)),
        }
    }
}
