use super::app::{AppConfig, PromptOverrides, ResourcesConfig};
use super::defaults::default_providers;
use super::error::ConfigError;
use super::guardrail::{GuardrailConfig, RawGuardrail};
use super::provider::{ModelProviderConfig, RawProviderConfig};
use super::server::{RawServerSection, RestServerConfig};
use crate::application::template::PromptTemplate;
use crate::constants::{CONFIG_PATH, ENV_PATHS};
use dotenvy::from_filename;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub server: RawServerSection,
    #[serde(default)]
    pub resources: RawResources,
    #[serde(default)]
    pub guardrail: RawGuardrail,
    #[serde(default)]
    pub prompts: PromptOverrides,
    /// `None` keeps the built-in providers, an empty list disables generation
    pub providers: Option<Vec<RawProviderConfig>>,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct RawResources {
    database: Option<String>,
    star_guide: Option<String>,
}

/// Ensures environment variables are loaded from the known .env files
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        for path in ENV_PATHS {
            if from_filename(path).is_ok() {
                debug!(path, "Loaded environment file");
            }
        }
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    read_config(config_path)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str, origin: &Path) -> Result<AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    validate_and_build(parsed)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading service configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let providers = match parsed.providers {
        None => default_providers(),
        Some(raw) => {
            let mut seen = HashSet::new();
            let mut providers = Vec::with_capacity(raw.len());
            for raw_provider in raw {
                if !seen.insert(raw_provider.id.clone()) {
                    return Err(ConfigError::DuplicateProvider {
                        provider: raw_provider.id,
                    });
                }
                providers.push(ModelProviderConfig::try_from(raw_provider)?);
            }
            providers
        }
    };

    validate_prompt("manager", parsed.prompts.manager.as_deref())?;
    validate_prompt("coach", parsed.prompts.coach.as_deref())?;
    validate_prompt("match_skills", parsed.prompts.match_skills.as_deref())?;
    validate_prompt("resume_validator", parsed.prompts.resume_validator.as_deref())?;

    let defaults = ResourcesConfig::default();
    let resources = ResourcesConfig {
        database: parsed
            .resources
            .database
            .map(|p| expand_path(&p))
            .unwrap_or(defaults.database),
        star_guide: parsed
            .resources
            .star_guide
            .map(|p| expand_path(&p))
            .unwrap_or(defaults.star_guide),
    };

    Ok(AppConfig {
        server: RestServerConfig::try_from(parsed.server)?,
        resources,
        guardrail: GuardrailConfig::try_from(parsed.guardrail)?,
        prompts: parsed.prompts,
        providers,
    })
}

fn validate_prompt(name: &'static str, template: Option<&str>) -> Result<(), ConfigError> {
    if let Some(text) = template {
        PromptTemplate::new(text).map_err(|source| ConfigError::InvalidPrompt { name, source })?;
    }
    Ok(())
}

fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::full(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    PathBuf::from(expanded)
}
