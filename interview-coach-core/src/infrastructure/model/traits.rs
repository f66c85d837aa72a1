//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse, ModerationResult};
use async_trait::async_trait;

/// One text-generation provider.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Provider name, unique within a registry
    fn id(&self) -> &str;

    /// Generate a completion for a fully rendered prompt
    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}

/// A content moderation endpoint.
#[async_trait]
pub trait ModerationClient: Send + Sync {
    async fn moderate(&self, text: &str) -> Result<ModerationResult, ModelError>;
}
