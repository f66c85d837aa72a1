//! # Provider Configuration
//!
//! Configuration types for generation providers.
//!
//! | Type | Wire format | API Key Required |
//! |------|-------------|------------------|
//! | `gemini` / `google` | Gemini `generateContent` | Yes |
//! | anything else | OpenAI-compatible chat completions | Yes |

use serde::Deserialize;
use std::fmt;

use super::defaults::{DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_TEMPERATURE};
use super::error::ConfigError;

/// Priority class of a provider inside an execution plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Interchangeable primary providers, tried in random order.
    Primary,
    /// Last-resort providers, tried in declaration order after every primary.
    Fallback,
}

impl Tier {
    pub fn from_number(provider: &str, tier: u8) -> Result<Self, ConfigError> {
        match tier {
            1 => Ok(Tier::Primary),
            2 => Ok(Tier::Fallback),
            other => Err(ConfigError::InvalidTier {
                provider: provider.to_string(),
                tier: other,
            }),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Tier::Primary => 1,
            Tier::Fallback => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier{}", self.number())
    }
}

/// Configuration for one generation provider.
///
/// # Example
///
/// ```toml
/// [[providers]]
/// id = "groq"
/// type = "openai"
/// tier = 2
/// endpoint = "https://api.groq.com/openai"
/// api_key = "GROQ_API_KEY"
/// model = "llama-3.3-70b-versatile"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProviderConfig {
    /// Unique provider name, used in execution plans and logs
    pub id: String,
    /// Wire format selector: "gemini" or anything OpenAI-compatible
    pub provider_type: String,
    pub tier: Tier,
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key: Option<String>,
    /// Custom API path override
    pub api_path: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl ModelProviderConfig {
    /// Check if this is a Gemini provider (case-insensitive).
    pub fn is_gemini(&self) -> bool {
        matches!(
            self.provider_type.to_lowercase().as_str(),
            "gemini" | "google" | "google-ai"
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: String,
    #[serde(rename = "type", default)]
    pub(super) provider_type: String,
    #[serde(default)]
    pub(super) tier: Option<u8>,
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
    pub(super) model: Option<String>,
    #[serde(default)]
    pub(super) temperature: Option<f32>,
    #[serde(default)]
    pub(super) timeout_secs: Option<u64>,
}

impl TryFrom<RawProviderConfig> for ModelProviderConfig {
    type Error = ConfigError;

    fn try_from(raw: RawProviderConfig) -> Result<Self, Self::Error> {
        let endpoint = raw
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEndpoint {
                provider: raw.id.clone(),
            })?;
        let model = raw
            .model
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingModel {
                provider: raw.id.clone(),
            })?;
        let tier = Tier::from_number(&raw.id, raw.tier.unwrap_or(1))?;
        let provider_type = if raw.provider_type.trim().is_empty() {
            "openai".to_string()
        } else {
            raw.provider_type
        };

        Ok(Self {
            id: raw.id,
            provider_type,
            tier,
            endpoint,
            api_key: raw.api_key,
            api_path: raw.api_path,
            model,
            temperature: raw.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            timeout_secs: raw.timeout_secs.unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
        })
    }
}
