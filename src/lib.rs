#![deny(missing_docs)]

//! Core library for the PDF summarizer.

/// Environment-driven configuration management.
pub mod config;
/// PDF text extraction.
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Chunking and summary orchestration.
pub mod processing;
/// Summarization client abstraction and adapters.
pub mod summarization;
