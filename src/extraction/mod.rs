//! Plain-text extraction from PDF documents.
//!
//! The pipeline only depends on the [`TextExtractor`] trait; [`PdfTextExtractor`] is the
//! production implementation backed by `lopdf`.

use lopdf::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while turning a document into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file could not be opened or is not a parseable PDF.
    #[error("Error reading PDF {}", .path.display())]
    Open {
        /// Document that failed to load.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: lopdf::Error,
    },
    /// The document is encrypted and cannot be read without a password.
    #[error("Error reading PDF {}: document is encrypted", .path.display())]
    Encrypted {
        /// Encrypted document.
        path: PathBuf,
    },
    /// Text could not be decoded from one of the pages.
    #[error("Error reading PDF {} (page {page})", .path.display())]
    Page {
        /// Document being extracted.
        path: PathBuf,
        /// One-based page number that failed.
        page: u32,
        /// Underlying parser error.
        #[source]
        source: lopdf::Error,
    },
}

/// Source of the full plain text of a document.
pub trait TextExtractor: Send + Sync {
    /// Return the concatenated, trimmed text of every page in document order.
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// [`TextExtractor`] reading PDF files through `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Construct a new extractor.
    pub const fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let document = Document::load(path).map_err(|source| ExtractionError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        if document.is_encrypted() {
            return Err(ExtractionError::Encrypted {
                path: path.to_path_buf(),
            });
        }

        let pages = document.get_pages();
        tracing::debug!(path = %path.display(), pages = pages.len(), "Loaded PDF");

        let mut page_texts = Vec::with_capacity(pages.len());
        for page in pages.keys().copied() {
            let text = document
                .extract_text(&[page])
                .map_err(|source| ExtractionError::Page {
                    path: path.to_path_buf(),
                    page,
                    source,
                })?;
            page_texts.push(text);
        }

        Ok(join_pages(page_texts))
    }
}

/// Concatenate page texts, newline-terminating each non-empty page, then trim the result.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{
        Object, Stream,
        content::{Content, Operation},
        dictionary,
    };
    use std::io::Write;

    /// Write a PDF with one line of Courier text per page.
    fn write_pdf(path: &Path, pages: &[&str]) {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = document.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);
        document.save(path).expect("save pdf");
    }

    #[test]
    fn extracts_pages_in_document_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cv.pdf");
        write_pdf(&path, &["Jane Doe", "Rust engineer", "BSc Computer Science"]);

        let text = PdfTextExtractor::new().extract_text(&path).expect("text");

        assert_eq!(text, text.trim());
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert_eq!(lines, vec!["Jane Doe", "Rust engineer", "BSc Computer Science"]);
    }

    #[test]
    fn join_pages_skips_empty_pages_and_trims() {
        let text = join_pages(["  Jane Doe", "", "Rust engineer  \n"]);
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[test]
    fn join_pages_of_blank_document_is_empty() {
        assert_eq!(join_pages(["", "   ", "\n"]), "");
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.pdf");
        let error = PdfTextExtractor::new().extract_text(&path).unwrap_err();
        assert!(matches!(error, ExtractionError::Open { .. }));
        assert!(error.to_string().starts_with("Error reading PDF"));
    }

    #[test]
    fn non_pdf_bytes_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"this is plainly not a PDF document")
            .expect("write");
        let error = PdfTextExtractor::new()
            .extract_text(file.path())
            .unwrap_err();
        assert!(matches!(error, ExtractionError::Open { .. }));
    }
}
