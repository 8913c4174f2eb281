//! Summary pipeline coordinating extraction, chunking, and per-chunk summarization.

use crate::{
    extraction::TextExtractor,
    processing::{
        chunking::chunk_text,
        types::{ChunkingError, DocumentSummary, ProcessingError},
    },
    summarization::{SectionSummary, SummarizationClient, summarize_section},
};
use std::path::Path;

/// Summary returned when a document has no extractable text.
pub const NO_CONTENT_MESSAGE: &str = "No readable text found in PDF.";

/// Smallest word budget handed to any single chunk.
pub const MIN_CHUNK_WORD_BUDGET: usize = 50;

/// Word budget for each chunk when `max_words` is shared across `chunk_count` chunks.
pub fn per_chunk_budget(max_words: usize, chunk_count: usize) -> usize {
    (max_words / chunk_count.max(1)).max(MIN_CHUNK_WORD_BUDGET)
}

/// Number of whitespace-delimited words in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Runs the linear extract → chunk → summarize → combine pipeline for one document.
///
/// Requests are awaited one at a time in document order; nothing is shared between calls
/// beyond the per-invocation buffers.
pub struct SummaryPipeline {
    extractor: Box<dyn TextExtractor + Send + Sync>,
    summarizer: Box<dyn SummarizationClient + Send + Sync>,
}

impl SummaryPipeline {
    /// Build a pipeline from an extractor and a summarization client.
    pub fn new(
        extractor: Box<dyn TextExtractor + Send + Sync>,
        summarizer: Box<dyn SummarizationClient + Send + Sync>,
    ) -> Self {
        Self {
            extractor,
            summarizer,
        }
    }

    /// Extract the document at `path` and summarize it in at most `max_words` words.
    ///
    /// Fails only when the budgets are zero or the document cannot be read; empty documents
    /// produce [`NO_CONTENT_MESSAGE`] and summarization failures are embedded inline.
    pub async fn summarize_document(
        &self,
        path: &Path,
        max_words: usize,
        chunk_size: usize,
    ) -> Result<DocumentSummary, ProcessingError> {
        validate_budgets(max_words, chunk_size)?;
        tracing::info!(path = %path.display(), "Reading document");
        let text = self.extractor.extract_text(path)?;
        self.summarize_validated(&text, max_words, chunk_size).await
    }

    /// Summarize already-extracted text using the same budgeting rules as
    /// [`Self::summarize_document`].
    pub async fn summarize_text(
        &self,
        text: &str,
        max_words: usize,
        chunk_size: usize,
    ) -> Result<DocumentSummary, ProcessingError> {
        validate_budgets(max_words, chunk_size)?;
        self.summarize_validated(text, max_words, chunk_size).await
    }

    async fn summarize_validated(
        &self,
        text: &str,
        max_words: usize,
        chunk_size: usize,
    ) -> Result<DocumentSummary, ProcessingError> {
        let text = text.trim();
        if text.is_empty() {
            tracing::info!("Document contains no readable text");
            return Ok(DocumentSummary {
                text: NO_CONTENT_MESSAGE.to_string(),
                chunk_count: 0,
                sections: Vec::new(),
                corrective_pass: false,
            });
        }

        let char_count = text.chars().count();
        if char_count <= chunk_size {
            tracing::debug!(char_count, chunk_size, max_words, "Summarizing in a single pass");
            let section = summarize_section(self.summarizer.as_ref(), text, max_words).await;
            return Ok(DocumentSummary {
                text: section.clone().into_text(),
                chunk_count: 1,
                sections: vec![section],
                corrective_pass: false,
            });
        }

        let chunks = chunk_text(text, chunk_size)?;
        let chunk_count = chunks.len();
        let budget = per_chunk_budget(max_words, chunk_count);
        tracing::info!(
            char_count,
            chunk_size,
            chunks = chunk_count,
            per_chunk_budget = budget,
            "Split document into chunks"
        );

        let mut sections = Vec::with_capacity(chunk_count);
        for (index, chunk) in chunks.iter().enumerate() {
            tracing::info!("Processing part {}/{}", index + 1, chunk_count);
            sections.push(summarize_section(self.summarizer.as_ref(), chunk, budget).await);
        }

        let combined = sections
            .iter()
            .cloned()
            .map(SectionSummary::into_text)
            .collect::<Vec<_>>()
            .join(" ");

        let combined_words = count_words(&combined);
        if combined_words > max_words {
            tracing::info!(
                combined_words,
                max_words,
                "Combined summary over budget; running corrective pass"
            );
            let corrected = summarize_section(self.summarizer.as_ref(), &combined, max_words).await;
            return Ok(DocumentSummary {
                text: corrected.into_text(),
                chunk_count,
                sections,
                corrective_pass: true,
            });
        }

        Ok(DocumentSummary {
            text: combined,
            chunk_count,
            sections,
            corrective_pass: false,
        })
    }
}

fn validate_budgets(max_words: usize, chunk_size: usize) -> Result<(), ProcessingError> {
    if max_words == 0 {
        return Err(ProcessingError::InvalidWordBudget);
    }
    if chunk_size == 0 {
        return Err(ChunkingError::InvalidChunkSize.into());
    }
    Ok(())
}
