//! Trait definitions for the processor module.

use async_trait::async_trait;

use crate::document::{Document, Watermark};

/// Error raised while computing a watermark.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatermarkError {
    #[error("Watermarking failed: {0}")]
    Failed(String),
}

/// Computes the watermark for a document.
#[async_trait]
pub trait Watermarker: Send + Sync {
    /// Returns the name of this watermarker implementation.
    fn name(&self) -> &str;

    async fn watermark(&self, document: &Document) -> Result<Watermark, WatermarkError>;
}

/// Watermarker that derives the watermark from the document content alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentWatermarker;

#[async_trait]
impl Watermarker for ContentWatermarker {
    fn name(&self) -> &str {
        "content"
    }

    async fn watermark(&self, document: &Document) -> Result<Watermark, WatermarkError> {
        Ok(Watermark::create_for(document))
    }
}
