//! Document processing pipeline: chunking, per-chunk summarization, and recombination.

pub mod chunking;
mod service;
pub mod types;

pub use service::{
    MIN_CHUNK_WORD_BUDGET, NO_CONTENT_MESSAGE, SummaryPipeline, count_words, per_chunk_budget,
};
pub use types::{ChunkingError, DocumentSummary, ProcessingError};
