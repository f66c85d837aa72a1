//! PII redaction seam for text that leaves the process.

/// Removes personal data from free text before it is put into a prompt.
pub trait PiiRedactor: Send + Sync {
    fn redact(&self, text: &str) -> String;
}

/// Returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRedactor;

impl PiiRedactor for PassthroughRedactor {
    fn redact(&self, text: &str) -> String {
        text.to_string()
    }
}
