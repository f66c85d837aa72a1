//! Immutable set of live generation clients.

use std::sync::Arc;

use tracing::{info, warn};

use super::factory::{ProviderFactory, resolve_api_key};
use super::traits::ModelClient;
use crate::config::{ModelProviderConfig, Tier};

#[derive(Clone)]
struct RegisteredModel {
    tier: Tier,
    client: Arc<dyn ModelClient>,
}

/// Clients keyed by provider name, kept in registration order.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: Vec<RegisteredModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build clients for every provider whose API key resolves.
    ///
    /// Providers without a key, or whose client cannot be built, are left out
    /// with a warning.
    pub fn from_configs(configs: &[ModelProviderConfig]) -> Self {
        let mut registry = Self::new();
        for config in configs {
            let Some(api_key) = resolve_api_key(&config.id, config.api_key.as_deref()) else {
                warn!(provider = %config.id, "Provider skipped: no API key");
                continue;
            };
            match ProviderFactory::create(config, api_key) {
                Ok(client) => registry = registry.with_model(config.tier, client),
                Err(err) => warn!(provider = %config.id, %err, "Provider skipped"),
            }
        }
        info!(
            primary = registry.names(Tier::Primary).len(),
            fallback = registry.names(Tier::Fallback).len(),
            "Model registry ready"
        );
        registry
    }

    /// Register `client` under its own id, replacing any client of that name.
    pub fn with_model(mut self, tier: Tier, client: Arc<dyn ModelClient>) -> Self {
        let entry = RegisteredModel { tier, client };
        match self
            .models
            .iter_mut()
            .find(|m| m.client.id() == entry.client.id())
        {
            Some(existing) => *existing = entry,
            None => self.models.push(entry),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ModelClient>> {
        self.models
            .iter()
            .find(|m| m.client.id() == name)
            .map(|m| &m.client)
    }

    pub fn tier_of(&self, name: &str) -> Option<Tier> {
        self.models
            .iter()
            .find(|m| m.client.id() == name)
            .map(|m| m.tier)
    }

    /// Names registered in `tier`, in registration order.
    pub fn names(&self, tier: Tier) -> Vec<&str> {
        self.models
            .iter()
            .filter(|m| m.tier == tier)
            .map(|m| m.client.id())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
