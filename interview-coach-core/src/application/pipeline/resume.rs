//! Resume intake: PDF checks, text extraction and an AI plausibility check.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::CritiquePipeline;
use crate::application::orchestrator::OrchestratorError;
use crate::application::parser::{self, PayloadKind};
use crate::application::template::PromptInputs;
use crate::constants::{
    MAX_RESUME_BYTES, MIN_EXTRACTED_CHARS, UPLOAD_TEXT_CHARS, VALIDATION_RESUME_CHARS, operations,
    truncate_chars,
};
use crate::domain::types::{ResumeUpload, UploadStatus};

const PDF_MAGIC: &[u8] = b"%PDF";
const SCANNED_WARNING: &str = "File appears to be a scanned image. OCR may be required.";
const FLAGGED_REASON: &str = "Document was flagged by our safety guidelines.";
const NO_REASON: &str = "No reason given.";

#[derive(Debug, Error)]
pub enum UploadRejection {
    #[error("File too large. Max size is 5MB.")]
    TooLarge,
    #[error("Invalid file format. Not a valid PDF.")]
    NotPdf,
    #[error("File is corrupted or encrypted.")]
    Unreadable,
    #[error("Uploaded file does not appear to be a resume. AI says: {0}")]
    NotAResume(String),
    #[error(transparent)]
    Orchestration(#[from] OrchestratorError),
}

/// Outcome of asking the model whether a document is a resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeVerdict {
    pub is_valid: bool,
    pub reason: String,
}

impl ResumeVerdict {
    fn from_payload(payload: &serde_json::Map<String, Value>) -> Self {
        if payload.get("blocked").and_then(Value::as_bool) == Some(true) {
            return Self {
                is_valid: false,
                reason: FLAGGED_REASON.to_string(),
            };
        }
        Self {
            is_valid: payload.get("isValid").and_then(Value::as_bool).unwrap_or(true),
            reason: parser::field_text(payload, "reason", NO_REASON),
        }
    }
}

impl CritiquePipeline {
    /// Check, extract and validate an uploaded PDF resume.
    pub async fn ingest_resume(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ResumeUpload, UploadRejection> {
        if bytes.len() > MAX_RESUME_BYTES {
            warn!(filename, size = bytes.len(), "Resume upload too large");
            return Err(UploadRejection::TooLarge);
        }
        if !bytes.starts_with(PDF_MAGIC) {
            warn!(filename, "Resume upload is missing the PDF header");
            return Err(UploadRejection::NotPdf);
        }

        let extractor = Arc::clone(&self.extractor);
        let text = match tokio::task::spawn_blocking(move || extractor.extract_text(&bytes)).await
        {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => {
                warn!(filename, error = %err, "Resume text extraction failed");
                return Err(UploadRejection::Unreadable);
            }
            Err(err) => {
                warn!(filename, error = %err, "Resume extraction task failed");
                return Err(UploadRejection::Unreadable);
            }
        };

        let text = text.trim();
        if text.chars().count() < MIN_EXTRACTED_CHARS {
            info!(filename, "Resume has almost no text layer");
            return Ok(ResumeUpload {
                filename: filename.to_string(),
                status: UploadStatus::PartialSuccess,
                warning: Some(SCANNED_WARNING.to_string()),
                extracted_text: String::new(),
            });
        }

        let verdict = self.validate_resume(text).await?;
        if !verdict.is_valid {
            info!(filename, reason = %verdict.reason, "Upload rejected as not a resume");
            return Err(UploadRejection::NotAResume(verdict.reason));
        }

        info!(filename, chars = text.chars().count(), "Resume accepted");
        Ok(ResumeUpload {
            filename: filename.to_string(),
            status: UploadStatus::Success,
            warning: None,
            extracted_text: truncate_chars(text, UPLOAD_TEXT_CHARS).to_string(),
        })
    }

    /// Ask the model whether `text` reads like a resume.
    ///
    /// Unparseable or missing answers count as valid.
    pub async fn validate_resume(&self, text: &str) -> Result<ResumeVerdict, OrchestratorError> {
        let redacted = self
            .redactor
            .redact(truncate_chars(text, VALIDATION_RESUME_CHARS));
        let inputs = PromptInputs::new()
            .with("resume_text", truncate_chars(&redacted, VALIDATION_RESUME_CHARS));
        let raw = self
            .orchestrator
            .run(
                &self.prompts.resume_validator,
                &inputs,
                operations::RESUME_VALIDATOR,
            )
            .await?;
        let payload = parser::extract_json(&raw, PayloadKind::ResumeCheck);
        Ok(ResumeVerdict::from_payload(&payload))
    }
}
