//! OpenAI moderation endpoint

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::base::{ClientSettings, HttpClientBase};
use crate::constants::MODERATION_API_PATH;
use crate::infrastructure::model::traits::ModerationClient;
use crate::infrastructure::model::types::{ModelError, ModerationResult};

#[derive(Clone)]
pub struct OpenAiModerator {
    base: HttpClientBase,
    api_path: String,
    model: String,
}

impl OpenAiModerator {
    pub fn new(settings: ClientSettings) -> Result<Self, ModelError> {
        Ok(Self {
            base: HttpClientBase::new(&settings)?,
            api_path: settings
                .api_path
                .unwrap_or_else(|| MODERATION_API_PATH.to_string()),
            model: settings.model,
        })
    }
}

#[async_trait]
impl ModerationClient for OpenAiModerator {
    async fn moderate(&self, text: &str) -> Result<ModerationResult, ModelError> {
        let url = self.base.build_url(&self.api_path);
        let payload = ModerationRequest {
            model: &self.model,
            input: text,
        };

        let response: ModerationResponse = self.base.post_with_bearer(&url, &payload).await?;
        let Some(first) = response.results.into_iter().next() else {
            return Err(ModelError::invalid_response(&self.base.id, "no moderation results"));
        };
        debug!(flagged = first.flagged, "Moderation verdict received");

        Ok(ModerationResult {
            flagged: first.flagged,
            categories: first
                .categories
                .into_iter()
                .filter(|(_, hit)| *hit)
                .map(|(name, _)| name)
                .collect(),
        })
    }
}

#[derive(Serialize)]
struct ModerationRequest<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct ModerationResponse {
    #[serde(default)]
    results: Vec<ModerationEntry>,
}

#[derive(Deserialize)]
struct ModerationEntry {
    flagged: bool,
    #[serde(default)]
    categories: BTreeMap<String, bool>,
}
