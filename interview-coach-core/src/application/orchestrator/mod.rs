//! Tiered multi-provider failover.
//!
//! One [`Orchestrator::run`] call turns a template plus inputs into text:
//!
//! 1. The template is rendered once.
//! 2. An [`ExecutionPlan`] is drawn from the registry. An empty plan returns
//!    the static fallback straight away, with no guardrail or provider call.
//! 3. The guardrail scans the flattened inputs. A block returns
//!    [`GUARDRAIL_REFUSAL`] without touching any provider.
//! 4. The plan is tried in order. The first provider to answer wins. When
//!    every provider fails, the static fallback for the operation is returned.
//!
//! Provider trouble never surfaces as an error. Only a template that cannot be
//! bound does.

mod plan;
mod telemetry;

pub use plan::{
    ExecutionPlan, KeepOrder, PlannedAttempt, ProviderShuffle, RandomShuffle, SeededShuffle,
};
pub use telemetry::AttemptRecord;

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, warn};

use super::fallback;
use super::guardrails::{Guardrail, GuardrailCategory, GuardrailVerdict};
use super::template::{PromptInputs, PromptTemplate, TemplateError};
use crate::constants::{GUARDRAIL_REFUSAL, preview};
use crate::infrastructure::model::{ModelRegistry, ModelRequest};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("prompt for '{operation}' could not be bound: {source}")]
    Template {
        operation: String,
        #[source]
        source: TemplateError,
    },
}

impl OrchestratorError {
    pub fn user_message(&self) -> String {
        match self {
            OrchestratorError::Template { operation, .. } => {
                format!("The {operation} prompt is misconfigured.")
            }
        }
    }
}

/// How an orchestration produced its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated { provider: String },
    Refused(GuardrailCategory),
    StaticFallback,
}

/// Text plus everything observed while producing it.
#[derive(Debug, Clone)]
pub struct Orchestration {
    pub text: String,
    pub outcome: Outcome,
    pub attempts: Vec<AttemptRecord>,
}

#[derive(Clone)]
pub struct Orchestrator {
    registry: Arc<ModelRegistry>,
    guardrail: Arc<dyn Guardrail>,
    shuffle: Arc<dyn ProviderShuffle>,
}

impl Orchestrator {
    pub fn new(registry: Arc<ModelRegistry>, guardrail: Arc<dyn Guardrail>) -> Self {
        Self {
            registry,
            guardrail,
            shuffle: Arc::new(RandomShuffle),
        }
    }

    pub fn with_shuffle(mut self, shuffle: Arc<dyn ProviderShuffle>) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub async fn run(
        &self,
        template: &PromptTemplate,
        inputs: &PromptInputs,
        operation: &str,
    ) -> Result<String, OrchestratorError> {
        self.run_detailed(template, inputs, operation)
            .await
            .map(|orchestration| orchestration.text)
    }

    pub async fn run_detailed(
        &self,
        template: &PromptTemplate,
        inputs: &PromptInputs,
        operation: &str,
    ) -> Result<Orchestration, OrchestratorError> {
        let prompt = template
            .render(inputs)
            .map_err(|source| OrchestratorError::Template {
                operation: operation.to_string(),
                source,
            })?;

        let plan = ExecutionPlan::build(&self.registry, self.shuffle.as_ref());
        if plan.is_empty() {
            error!(operation, critical = true, "No AI models available, using static response");
            return Ok(Self::static_fallback(operation, Vec::new()));
        }

        if let GuardrailVerdict::Blocked(category) = self.guardrail.scan(&inputs.flatten()).await {
            warn!(operation, %category, "Orchestration refused by guardrail");
            return Ok(Orchestration {
                text: GUARDRAIL_REFUSAL.to_string(),
                outcome: Outcome::Refused(category),
                attempts: Vec::new(),
            });
        }
        info!(operation, plan = ?plan.names(), "Execution plan ready");

        let input_preview = preview(&prompt);
        let mut attempts = Vec::with_capacity(plan.len());

        for step in plan.iter() {
            let Some(client) = self.registry.get(&step.provider) else {
                continue;
            };
            info!(operation, provider = %step.provider, "Attempting provider");

            let started = Instant::now();
            let result = client.generate(ModelRequest::new(prompt.as_str())).await;
            let latency = started.elapsed();

            match result {
                Ok(response) => {
                    let record = AttemptRecord {
                        provider: step.provider.clone(),
                        tier: step.tier,
                        latency,
                        input_preview: input_preview.clone(),
                        output_preview: Some(preview(&response.content)),
                        usage: response.usage,
                        error: None,
                    };
                    record.log(operation);
                    attempts.push(record);
                    return Ok(Orchestration {
                        text: response.content,
                        outcome: Outcome::Generated {
                            provider: step.provider.clone(),
                        },
                        attempts,
                    });
                }
                Err(err) => {
                    let record = AttemptRecord {
                        provider: step.provider.clone(),
                        tier: step.tier,
                        latency,
                        input_preview: input_preview.clone(),
                        output_preview: None,
                        usage: None,
                        error: Some(format!("{}: {err}", err.kind())),
                    };
                    record.log(operation);
                    attempts.push(record);
                }
            }
        }

        error!(
            operation,
            critical = true,
            attempts = attempts.len(),
            "All AI models failed, using static response"
        );
        Ok(Self::static_fallback(operation, attempts))
    }

    fn static_fallback(operation: &str, attempts: Vec<AttemptRecord>) -> Orchestration {
        Orchestration {
            text: fallback::generate(operation),
            outcome: Outcome::StaticFallback,
            attempts,
        }
    }
}
