//! Provider factory - creates clients from config

use std::env;
use std::sync::Arc;

use tracing::warn;

use super::clients::{ClientSettings, GeminiClient, OpenAIClient};
use super::traits::ModelClient;
use super::types::ModelError;
use crate::config::ModelProviderConfig;

/// Resolve API key from environment variable
pub fn resolve_api_key(provider: &str, spec: Option<&str>) -> Option<String> {
    let raw = spec.map(str::trim).filter(|raw| !raw.is_empty())?;
    match env::var(raw) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => {
            warn!(provider, env_var = raw, "API key environment variable is empty");
            None
        }
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Factory for creating model clients from provider config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates a model client based on provider type.
    ///
    /// - `gemini`, `google`, `google-ai` → Gemini format
    /// - Others → OpenAI-compatible format (default)
    pub fn create(
        config: &ModelProviderConfig,
        api_key: String,
    ) -> Result<Arc<dyn ModelClient>, ModelError> {
        let settings = ClientSettings::from_config(config, api_key);
        if config.is_gemini() {
            Ok(Arc::new(GeminiClient::new(settings)?))
        } else {
            Ok(Arc::new(OpenAIClient::new(settings)?))
        }
    }
}
