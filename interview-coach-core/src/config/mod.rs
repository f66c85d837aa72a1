pub mod app;
pub mod defaults;
pub mod error;
pub mod guardrail;
pub mod loader;
pub mod provider;
pub mod server;

pub use app::{AppConfig, PromptOverrides, ResourcesConfig};
pub use error::ConfigError;
pub use guardrail::GuardrailConfig;
pub use provider::{ModelProviderConfig, Tier};
pub use server::RestServerConfig;
