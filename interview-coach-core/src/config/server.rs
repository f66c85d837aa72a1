use serde::Deserialize;
use std::env;
use std::net::SocketAddr;
use tracing::warn;

use super::defaults::{
    DEFAULT_BIND, DEFAULT_CORS_ORIGINS, DEFAULT_SECRET_ENV, DEFAULT_SECRET_HEADER,
};
use super::error::ConfigError;

/// REST server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestServerConfig {
    pub bind: SocketAddr,
    pub cors_origins: Vec<String>,
    /// Header carrying the shared secret
    pub secret_header: String,
    /// Name of the environment variable holding the shared secret
    pub secret_env: String,
}

impl RestServerConfig {
    /// Read the shared secret from the environment, if one is set.
    pub fn resolve_secret(&self) -> Option<String> {
        match env::var(&self.secret_env) {
            Ok(value) if !value.trim().is_empty() => Some(value),
            _ => {
                warn!(
                    env_var = self.secret_env.as_str(),
                    "Shared secret is not set; request authentication is disabled"
                );
                None
            }
        }
    }
}

impl Default for RestServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            secret_header: DEFAULT_SECRET_HEADER.to_string(),
            secret_env: DEFAULT_SECRET_ENV.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawServerSection {
    bind: Option<String>,
    cors_origins: Option<Vec<String>>,
    secret_header: Option<String>,
    secret_env: Option<String>,
}

impl TryFrom<RawServerSection> for RestServerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawServerSection) -> Result<Self, Self::Error> {
        let defaults = RestServerConfig::default();
        let bind_value = raw.bind.unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_value.clone(),
                source,
            })?;
        Ok(Self {
            bind,
            cors_origins: raw.cors_origins.unwrap_or(defaults.cors_origins),
            secret_header: raw
                .secret_header
                .map(|h| h.to_ascii_lowercase())
                .unwrap_or(defaults.secret_header),
            secret_env: raw.secret_env.unwrap_or(defaults.secret_env),
        })
    }
}
