//! Gemini client implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::base::{ClientSettings, HttpClientBase};
use crate::constants::DEFAULT_GEMINI_API_PATH;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse, TokenUsage};

/// Gemini client for Google AI
#[derive(Clone)]
pub struct GeminiClient {
    base: HttpClientBase,
    api_path: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ModelError> {
        Ok(Self {
            base: HttpClientBase::new(&settings)?,
            api_path: settings
                .api_path
                .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string()),
            model: settings.model,
            temperature: settings.temperature,
        })
    }

    fn build_model_url(&self) -> String {
        let path = self.api_path.trim_matches('/');
        self.base
            .build_url(&format!("{path}/{}:generateContent", self.model))
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.build_model_url();

        let mut generation_config = json!({ "temperature": self.temperature });
        if request.json_mode {
            generation_config["responseMimeType"] = json!("application/json");
        }

        let mut payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": request.prompt}]
            }],
            "generationConfig": generation_config
        });

        if let Some(system) = request.system.as_deref() {
            payload["system_instruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        info!(
            provider = self.base.id.as_str(),
            model = self.model.as_str(),
            json_mode = request.json_mode,
            "Sending request to Gemini"
        );

        let response: GeminiResponse = self.base.post_with_query_key(&url, &payload).await?;
        debug!("Received response from Gemini");

        let content: String = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ModelError::invalid_response(&self.base.id, "missing content"));
        }

        let mut result = ModelResponse::new(content);
        if let Some(usage) = response.usage_metadata {
            result = result.with_usage(TokenUsage::new(
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count,
            ));
        }
        Ok(result)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    total_token_count: Option<u64>,
}
