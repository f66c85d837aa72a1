use crate::application::template::TemplateError;
use std::io;
use std::net::AddrParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("provider '{provider}' is declared more than once")]
    DuplicateProvider { provider: String },

    #[error("provider '{provider}' is missing required field 'endpoint'")]
    MissingEndpoint { provider: String },

    #[error("provider '{provider}' is missing required field 'model'")]
    MissingModel { provider: String },

    #[error("provider '{provider}' has invalid tier {tier} (expected 1 or 2)")]
    InvalidTier { provider: String, tier: u8 },

    #[error("guardrail jailbreak_threshold {value} is outside 0.0..=1.0")]
    InvalidThreshold { value: f64 },

    #[error("invalid server bind address '{value}': {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("prompt override '{name}' is not a valid template: {source}")]
    InvalidPrompt {
        name: &'static str,
        #[source]
        source: TemplateError,
    },
}
