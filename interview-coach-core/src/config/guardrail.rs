use serde::Deserialize;

use super::defaults::{
    DEFAULT_CLASSIFIER_MODEL, DEFAULT_GUARDRAIL_TIMEOUT_SECS, DEFAULT_JAILBREAK_THRESHOLD,
    DEFAULT_OPENAI_ENDPOINT,
};
use super::error::ConfigError;

/// Settings for the pre-generation safety checks.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardrailConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key: Option<String>,
    pub classifier_model: String,
    pub jailbreak_threshold: f64,
    pub timeout_secs: u64,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            api_key: Some("OPENAI_API_KEY".to_string()),
            classifier_model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            jailbreak_threshold: DEFAULT_JAILBREAK_THRESHOLD,
            timeout_secs: DEFAULT_GUARDRAIL_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawGuardrail {
    enabled: Option<bool>,
    endpoint: Option<String>,
    api_key: Option<String>,
    classifier_model: Option<String>,
    jailbreak_threshold: Option<f64>,
    timeout_secs: Option<u64>,
}

impl TryFrom<RawGuardrail> for GuardrailConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGuardrail) -> Result<Self, Self::Error> {
        let defaults = GuardrailConfig::default();
        let threshold = raw
            .jailbreak_threshold
            .unwrap_or(defaults.jailbreak_threshold);
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold { value: threshold });
        }
        Ok(Self {
            enabled: raw.enabled.unwrap_or(defaults.enabled),
            endpoint: raw.endpoint.unwrap_or(defaults.endpoint),
            api_key: raw.api_key.or(defaults.api_key),
            classifier_model: raw.classifier_model.unwrap_or(defaults.classifier_model),
            jailbreak_threshold: threshold,
            timeout_secs: raw.timeout_secs.unwrap_or(defaults.timeout_secs),
        })
    }
}
