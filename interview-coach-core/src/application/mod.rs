//! Application layer: prompt handling, safety checks, failover orchestration
//! and the streaming pipelines built on top of them.

pub mod bootstrap;
pub mod extraction;
pub mod fallback;
pub mod guardrails;
pub mod orchestrator;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod redaction;
pub mod template;
