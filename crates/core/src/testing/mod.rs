//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use watermark_core::testing::{fixtures, MockWatermarker};
//!
//! let watermarker = MockWatermarker::new();
//! let book = fixtures::book("Earth", "Ikaro", "EStinmpoutsm", Topic::Media);
//! ```

mod mock_watermarker;

pub use mock_watermarker::{MockWatermarker, RecordedWatermark};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::document::{Author, Document, Topic, Watermark};

    /// Create a book with the given author names.
    pub fn book(title: &str, first_name: &str, last_name: &str, topic: Topic) -> Document {
        Document::book(title, Author::new(first_name, last_name), topic)
    }

    /// Create a journal with the given author names.
    pub fn journal(title: &str, first_name: &str, last_name: &str) -> Document {
        Document::journal(title, Author::new(first_name, last_name))
    }

    /// The document with its watermark attached.
    pub fn watermarked(document: &Document) -> Document {
        document.with_watermark(Watermark::create_for(document))
    }

    /// The `index`-th document of a deterministic, pairwise-distinct series,
    /// alternating books and journals.
    pub fn numbered(index: usize) -> Document {
        let title = format!("Document {}", index);
        let author = Author::new(format!("First{}", index), format!("Last{}", index));
        if index % 2 == 0 {
            let topic = match index % 3 {
                0 => Topic::Business,
                1 => Topic::Science,
                _ => Topic::Media,
            };
            Document::book(title, author, topic)
        } else {
            Document::journal(title, author)
        }
    }
}
