//! Core document data types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Author / Topic / Content
// ============================================================================

/// An individual author. Only first and last name are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Topic of a book publication.
///
/// Names are matched exactly (`"Business"`, not `"business"`), both in JSON
/// bodies and in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Business,
    Science,
    Media,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Business => "Business",
            Topic::Science => "Science",
            Topic::Media => "Media",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known topic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown topic: {0}")]
pub struct TopicParseError(pub String);

impl FromStr for Topic {
    type Err = TopicParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Business" => Ok(Topic::Business),
            "Science" => Ok(Topic::Science),
            "Media" => Ok(Topic::Media),
            other => Err(TopicParseError(other.to_string())),
        }
    }
}

/// The kind of content a document (and its watermark) carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Content {
    Book,
    Journal,
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Book => f.write_str("Book"),
            Content::Journal => f.write_str("Journal"),
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// Variant-specific part of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Book { topic: Topic },
    Journal,
}

impl DocumentKind {
    pub fn content(&self) -> Content {
        match self {
            DocumentKind::Book { .. } => Content::Book,
            DocumentKind::Journal => Content::Journal,
        }
    }

    pub fn topic(&self) -> Option<Topic> {
        match self {
            DocumentKind::Book { topic } => Some(*topic),
            DocumentKind::Journal => None,
        }
    }
}

/// A document submitted for watermarking.
///
/// Documents are never mutated once built. Attaching a watermark produces a
/// new document via [`Document::with_watermark`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    author: Author,
    kind: DocumentKind,
    watermark: Option<Watermark>,
}

impl Document {
    /// A book about `topic`.
    pub fn book(title: impl Into<String>, author: Author, topic: Topic) -> Self {
        Self {
            title: title.into(),
            author,
            kind: DocumentKind::Book { topic },
            watermark: None,
        }
    }

    pub fn journal(title: impl Into<String>, author: Author) -> Self {
        Self {
            title: title.into(),
            author,
            kind: DocumentKind::Journal,
            watermark: None,
        }
    }

    /// Builds a book when a topic is given and a journal otherwise.
    pub fn from_parts(title: impl Into<String>, author: Author, topic: Option<Topic>) -> Self {
        match topic {
            Some(topic) => Self::book(title, author, topic),
            None => Self::journal(title, author),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn content(&self) -> Content {
        self.kind.content()
    }

    pub fn topic(&self) -> Option<Topic> {
        self.kind.topic()
    }

    pub fn watermark(&self) -> Option<&Watermark> {
        self.watermark.as_ref()
    }

    pub fn is_watermarked(&self) -> bool {
        self.watermark.is_some()
    }

    /// Returns a copy of this document carrying `watermark`.
    pub fn with_watermark(&self, watermark: Watermark) -> Self {
        Self {
            title: self.title.clone(),
            author: self.author.clone(),
            kind: self.kind,
            watermark: Some(watermark),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DocumentKind::Book { topic } => write!(
                f,
                "Book{{title='{}', author={}, topic={}}}",
                self.title, self.author, topic
            ),
            DocumentKind::Journal => {
                write!(f, "Journal{{title='{}', author={}}}", self.title, self.author)
            }
        }
    }
}

// ============================================================================
// Watermark
// ============================================================================

/// The watermark derived from a document.
///
/// Books carry content, title, author and topic; journals omit the topic,
/// and so does their JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Watermark {
    pub content: Content,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
}

impl Watermark {
    /// Computes the watermark for `document`. Depends only on the document's
    /// content, so equal documents always yield equal watermarks.
    pub fn create_for(document: &Document) -> Self {
        Self {
            content: document.content(),
            title: document.title.clone(),
            author: document.author.to_string(),
            topic: document.topic(),
        }
    }
}
