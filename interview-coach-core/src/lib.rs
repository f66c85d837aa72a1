//! Interview answer critique service core.
//!
//! Turns a set of unreliable, rate-limited LLM providers into dependable
//! structured critiques: tiered failover with static fallbacks, input
//! guardrails, response parsing and NDJSON streaming pipelines, served over
//! an axum REST API.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::bootstrap::{build_pipeline, load_star_guide};
pub use application::orchestrator::{Orchestrator, OrchestratorError};
pub use application::pipeline::{CritiquePipeline, PipelineError, StreamEvent};
pub use config::{AppConfig, ConfigError};
pub use domain::types;
pub use infrastructure::{model, server, skills};
