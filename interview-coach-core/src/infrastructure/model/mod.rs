//! Model infrastructure module
//!
//! Generation and moderation clients plus the registry the orchestrator
//! draws its execution plans from.
//!
//! # Structure
//! - `types` - Request, Response, Usage and Error types
//! - `traits` - ModelClient, ModerationClient traits
//! - `clients` - Individual client implementations
//! - `factory` - Builds clients from provider config
//! - `registry` - Immutable set of live clients keyed by provider name

pub mod clients;
pub mod factory;
pub mod registry;
pub mod traits;
pub mod types;

pub use registry::ModelRegistry;
pub use traits::{ModelClient, ModerationClient};
pub use types::{ModelError, ModelRequest, ModelResponse, ModerationResult, TokenUsage};
