//! Documents submitted for watermarking and the watermarks derived from them.

mod types;

pub use types::{Author, Content, Document, DocumentKind, Topic, TopicParseError, Watermark};
