//! Base HTTP client with shared logic

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ModelProviderConfig;
use crate::config::defaults::{DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_TEMPERATURE};
use crate::constants::truncate_chars;
use crate::infrastructure::model::types::ModelError;

/// Upstream error bodies are cut to this many characters.
const ERROR_BODY_CHARS: usize = 300;

/// Everything a concrete client needs, with the API key already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub id: String,
    pub endpoint: String,
    pub api_key: String,
    pub api_path: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_path: None,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &ModelProviderConfig, api_key: impl Into<String>) -> Self {
        Self {
            id: config.id.clone(),
            endpoint: config.endpoint.clone(),
            api_key: api_key.into(),
            api_path: config.api_path.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = Some(api_path.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    api_key: String,
    timeout: Duration,
    http: Client,
}

impl HttpClientBase {
    pub fn new(settings: &ClientSettings) -> Result<Self, ModelError> {
        if settings.api_key.trim().is_empty() {
            return Err(ModelError::missing_api_key(&settings.id));
        }
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ModelError::network(&settings.id, e))?;
        Ok(Self {
            id: settings.id.clone(),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            timeout: settings.timeout,
            http,
        })
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Post JSON with bearer auth
    pub async fn post_with_bearer<Req, Res>(&self, url: &str, body: &Req) -> Result<Res, ModelError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let request = self.http.post(url).bearer_auth(&self.api_key).json(body);
        self.send(request).await
    }

    /// Post JSON with query param auth (for Gemini)
    pub async fn post_with_query_key<Req, Res>(
        &self,
        url: &str,
        body: &Req,
    ) -> Result<Res, ModelError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let request = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body);
        self.send(request).await
    }

    async fn send<Res: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Res, ModelError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::status(
                &self.id,
                status,
                truncate_chars(body.trim(), ERROR_BODY_CHARS),
            ));
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ModelError::invalid_response(&self.id, e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::timeout(&self.id, self.timeout)
        } else {
            ModelError::network(&self.id, err)
        }
    }
}
