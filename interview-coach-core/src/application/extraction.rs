//! Document text extraction seam for uploaded resumes.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document could not be parsed: {0}")]
    Malformed(String),
    #[error("document parser crashed")]
    Crashed,
}

/// Turns an uploaded document into plain text. Synchronous and CPU bound.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF text extraction backed by `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl DocumentTextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // the parser panics on some malformed cross-reference tables
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));
        match outcome {
            Ok(Ok(text)) => {
                debug!(chars = text.chars().count(), "PDF text extracted");
                Ok(text.trim().to_string())
            }
            Ok(Err(err)) => {
                error!(%err, "PDF parse error");
                Err(ExtractionError::Malformed(err.to_string()))
            }
            Err(_) => {
                error!("PDF parser panicked");
                Err(ExtractionError::Crashed)
            }
        }
    }
}
