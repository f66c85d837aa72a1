//! Per-attempt records and their log lines.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::Tier;
use crate::infrastructure::model::TokenUsage;

/// What happened when one provider was tried.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    pub provider: String,
    pub tier: Tier,
    pub latency: Duration,
    /// Bounded single-line preview of the rendered prompt
    pub input_preview: String,
    /// Bounded preview of the completion, on success
    pub output_preview: Option<String>,
    pub usage: Option<TokenUsage>,
    /// Error classification and message, on failure
    pub error: Option<String>,
}

impl AttemptRecord {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub(super) fn log(&self, operation: &str) {
        let latency_ms = self.latency.as_millis() as u64;
        match &self.error {
            None => {
                let usage = self.usage.unwrap_or_default();
                info!(
                    operation,
                    provider = %self.provider,
                    tier = %self.tier,
                    latency_ms,
                    input_tokens = usage.input,
                    output_tokens = usage.output,
                    total_tokens = usage.total,
                    input = %self.input_preview,
                    output = self.output_preview.as_deref().unwrap_or_default(),
                    "Provider attempt succeeded"
                );
            }
            Some(error) => {
                warn!(
                    operation,
                    provider = %self.provider,
                    tier = %self.tier,
                    latency_ms,
                    error = %error,
                    "Provider attempt failed, failing over"
                );
            }
        }
    }
}
