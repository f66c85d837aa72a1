use super::defaults::{DEFAULT_DATABASE, DEFAULT_STAR_GUIDE_PATH, default_providers};
use super::error::ConfigError;
use super::guardrail::GuardrailConfig;
use super::provider::ModelProviderConfig;
use super::server::RestServerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Locations of the read-only resources the service consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcesConfig {
    /// SQLite database holding the skills taxonomy
    pub database: PathBuf,
    /// Plain-text interview style guide handed to the coach
    pub star_guide: PathBuf,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            star_guide: PathBuf::from(DEFAULT_STAR_GUIDE_PATH),
        }
    }
}

/// Optional inline replacements for the built-in prompt templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptOverrides {
    pub manager: Option<String>,
    pub coach: Option<String>,
    pub match_skills: Option<String>,
    pub resume_validator: Option<String>,
}

/// Application configuration loaded from coach.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: RestServerConfig,
    pub resources: ResourcesConfig,
    pub guardrail: GuardrailConfig,
    pub prompts: PromptOverrides,
    pub providers: Vec<ModelProviderConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: RestServerConfig::default(),
            resources: ResourcesConfig::default(),
            guardrail: GuardrailConfig::default(),
            prompts: PromptOverrides::default(),
            providers: default_providers(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Like [`AppConfig::load`], but a missing file at the *default* path
    /// yields the built-in configuration. An explicit path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match super::loader::load_config(path) {
            Err(ConfigError::NotFound { .. }) if path.is_none() => {
                super::loader::ensure_env_loaded();
                Ok(Self::default())
            }
            other => other,
        }
    }
}
