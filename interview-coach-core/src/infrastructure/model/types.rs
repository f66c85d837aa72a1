//! Model types - Request, Response, and Error types

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// A rendered prompt ready to be sent to one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub system: Option<String>,
    pub prompt: String,
    /// Ask the provider for a bare JSON object
    pub json_mode: bool,
}

impl ModelRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            json_mode: false,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

impl TokenUsage {
    pub fn new(input: u64, output: u64, total: Option<u64>) -> Self {
        Self {
            input,
            output,
            total: total.unwrap_or(input + output),
        }
    }
}

/// Completion text plus usage, when the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

impl ModelResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Outcome of a moderation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationResult {
    pub flagged: bool,
    /// Names of the categories that triggered the flag
    pub categories: Vec<String>,
}

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' timed out after {after:?}")]
    Timeout { provider: String, after: Duration },
    #[error("provider '{provider}' returned status {status}: {body}")]
    Status {
        provider: String,
        status: StatusCode,
        body: String,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn timeout(provider: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            provider: provider.into(),
            after,
        }
    }

    pub fn status(provider: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            body: body.into(),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            ModelError::MissingApiKey { provider }
            | ModelError::Network { provider, .. }
            | ModelError::Timeout { provider, .. }
            | ModelError::Status { provider, .. }
            | ModelError::InvalidResponse { provider, .. } => provider,
        }
    }

    /// Short classification used in attempt telemetry
    pub fn kind(&self) -> &'static str {
        match self {
            ModelError::MissingApiKey { .. } => "missing_api_key",
            ModelError::Network { .. } => "network",
            ModelError::Timeout { .. } => "timeout",
            ModelError::Status { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => {
                "quota"
            }
            ModelError::Status { status, .. } if status.is_client_error() => "rejected",
            ModelError::Status { .. } => "upstream",
            ModelError::InvalidResponse { .. } => "invalid_response",
        }
    }

    /// User-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ModelError::MissingApiKey { provider } => {
                format!("Provider '{provider}' requires an API key.")
            }
            ModelError::Network { provider, source } => {
                if source.is_connect() {
                    format!("Cannot connect to provider '{provider}'.")
                } else {
                    format!("Network error while calling provider '{provider}'.")
                }
            }
            ModelError::Timeout { provider, .. } => {
                format!("Provider '{provider}' did not answer in time.")
            }
            ModelError::Status {
                provider, status, ..
            } => match *status {
                StatusCode::TOO_MANY_REQUESTS => {
                    format!("Provider '{provider}' quota is exhausted. Try again later.")
                }
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                    format!("Provider '{provider}' is currently unavailable.")
                }
                other => format!("Request to '{provider}' failed: {}", other.as_u16()),
            },
            ModelError::InvalidResponse { provider, .. } => {
                format!("Response from '{provider}' could not be processed.")
            }
        }
    }
}
