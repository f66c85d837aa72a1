//! Built-in configuration used when no config file is present.
//!
//! Mirrors the production deployment: two interchangeable primary providers,
//! one fast last-resort provider and an OpenAI-backed guardrail.

use super::provider::{ModelProviderConfig, Tier};

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_SECRET_HEADER: &str = "x-poly-secret";
pub const DEFAULT_SECRET_ENV: &str = "BACKEND_SECRET";
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

pub const DEFAULT_DATABASE: &str = "skills.db";
pub const DEFAULT_STAR_GUIDE_PATH: &str = "star_guide.txt";

pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai";

pub const DEFAULT_CLASSIFIER_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_JAILBREAK_THRESHOLD: f64 = 0.8;
pub const DEFAULT_GUARDRAIL_TIMEOUT_SECS: u64 = 15;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

pub fn default_providers() -> Vec<ModelProviderConfig> {
    vec![
        ModelProviderConfig {
            id: "gemini".to_string(),
            provider_type: "gemini".to_string(),
            tier: Tier::Primary,
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_key: Some("GOOGLE_API_KEY".to_string()),
            api_path: None,
            model: "gemini-2.5-flash".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        },
        ModelProviderConfig {
            id: "openai".to_string(),
            provider_type: "openai".to_string(),
            tier: Tier::Primary,
            endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            api_key: Some("OPENAI_API_KEY".to_string()),
            api_path: None,
            model: "gpt-4o-mini".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        },
        ModelProviderConfig {
            id: "groq".to_string(),
            provider_type: "openai".to_string(),
            tier: Tier::Fallback,
            endpoint: DEFAULT_GROQ_ENDPOINT.to_string(),
            api_key: Some("GROQ_API_KEY".to_string()),
            api_path: None,
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        },
    ]
}
