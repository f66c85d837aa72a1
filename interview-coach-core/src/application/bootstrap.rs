//! Wiring from configuration to a ready pipeline.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::guardrails::GuardrailService;
use super::orchestrator::Orchestrator;
use super::pipeline::CritiquePipeline;
use super::prompts::PromptSet;
use super::template::TemplateError;
use crate::config::AppConfig;
use crate::constants::DEFAULT_STAR_GUIDE;
use crate::infrastructure::model::ModelRegistry;
use crate::infrastructure::skills::SqliteSkillsLookup;

/// Read the coach's style guide, or the built-in principle line when the file
/// is missing, unreadable or blank.
pub fn load_star_guide(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => {
            info!(path = %path.display(), chars = text.chars().count(), "STAR guide loaded");
            text
        }
        Ok(_) => {
            warn!(path = %path.display(), "STAR guide is empty, using default principles");
            DEFAULT_STAR_GUIDE.to_string()
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "STAR guide not readable, using default principles");
            DEFAULT_STAR_GUIDE.to_string()
        }
    }
}

/// Build every long-lived collaborator described by `config`.
pub fn build_pipeline(config: &AppConfig) -> Result<CritiquePipeline, TemplateError> {
    let prompts = PromptSet::with_overrides(&config.prompts)?;
    let registry = Arc::new(ModelRegistry::from_configs(&config.providers));
    if registry.is_empty() {
        warn!("No AI providers available, every request will get static responses");
    }
    let guardrail = GuardrailService::from_config(&config.guardrail);
    let orchestrator = Orchestrator::new(registry, guardrail);
    let skills = Arc::new(SqliteSkillsLookup::new(&config.resources.database));

    Ok(CritiquePipeline::new(orchestrator, skills, prompts)
        .with_star_guide(load_star_guide(&config.resources.star_guide)))
}
