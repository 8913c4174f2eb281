//! Core data types and error definitions for the processing pipeline.

use crate::{extraction::ExtractionError, summarization::SectionSummary};
use thiserror::Error;

/// Errors produced while splitting text into chunks.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// Caller configured an impossible character budget.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
}

/// Errors emitted by the document processing pipeline.
///
/// Summarization failures are deliberately absent: they degrade to inline markers instead.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The document could not be read or parsed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// Chunking step failed to segment the document.
    #[error("Failed to chunk document: {0}")]
    Chunking(#[from] ChunkingError),
    /// Caller requested a zero-word summary.
    #[error("maximum summary length must be greater than zero")]
    InvalidWordBudget,
}

/// Result of [`crate::processing::SummaryPipeline::summarize_document`].
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    /// Final summary text handed to the user.
    pub text: String,
    /// Number of chunks summarized (`1` for a single direct pass, `0` for empty documents).
    pub chunk_count: usize,
    /// Per-chunk outcomes in document order.
    pub sections: Vec<SectionSummary>,
    /// Whether a corrective pass condensed the combined chunk summaries.
    pub corrective_pass: bool,
}

impl DocumentSummary {
    /// Number of sections that degraded to an error marker.
    pub fn failed_sections(&self) -> usize {
        self.sections
            .iter()
            .filter(|section| section.is_failed())
            .count()
    }
}
