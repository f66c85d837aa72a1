#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::{FixedGuardrail, ScriptedClient};
use interview_coach_core::application::fallback;
use interview_coach_core::application::guardrails::{GuardrailCategory, GuardrailService};
use interview_coach_core::application::orchestrator::{KeepOrder, Outcome, SeededShuffle};
use interview_coach_core::application::template::{PromptInputs, PromptTemplate};
use interview_coach_core::config::Tier;
use interview_coach_core::constants::{GUARDRAIL_REFUSAL, operations};
use interview_coach_core::model::ModelRegistry;
use interview_coach_core::Orchestrator;

fn template() -> PromptTemplate {
    PromptTemplate::new("Critique for {role}: {student_answer}").expect("template parses")
}

fn inputs() -> PromptInputs {
    PromptInputs::new()
        .with("role", "Data Analyst")
        .with("student_answer", "I cleaned the dataset and built a dashboard.")
}

#[tokio::test]
async fn failing_primary_hands_over_to_next_primary_never_fallback_tier() {
    for seed in 0..16 {
        let a = ScriptedClient::failing("a");
        let b = ScriptedClient::replying("b", "critique from b");
        let c = ScriptedClient::replying("c", "critique from c");
        let registry = ModelRegistry::new()
            .with_model(Tier::Primary, a.clone())
            .with_model(Tier::Primary, b.clone())
            .with_model(Tier::Fallback, c.clone());
        let orchestrator = Orchestrator::new(Arc::new(registry), FixedGuardrail::allowing())
            .with_shuffle(Arc::new(SeededShuffle(seed)));

        let text = orchestrator
            .run(&template(), &inputs(), operations::MANAGER)
            .await
            .expect("orchestration succeeds");

        assert_eq!(text, "critique from b");
        assert_eq!(b.calls(), 1);
        assert_eq!(c.calls(), 0, "fallback tier must not run when a primary answers");
        assert!(a.calls() <= 1);
    }
}

#[tokio::test]
async fn fallback_tier_runs_after_every_primary_failed() {
    let a = ScriptedClient::failing("a");
    let b = ScriptedClient::timing_out("b");
    let c = ScriptedClient::replying("c", "rescued");
    let registry = ModelRegistry::new()
        .with_model(Tier::Primary, a.clone())
        .with_model(Tier::Primary, b.clone())
        .with_model(Tier::Fallback, c.clone());
    let orchestrator = Orchestrator::new(Arc::new(registry), FixedGuardrail::allowing());

    let result = orchestrator
        .run_detailed(&template(), &inputs(), operations::COACH)
        .await
        .expect("orchestration succeeds");

    assert_eq!(result.text, "rescued");
    assert_eq!(result.outcome, Outcome::Generated { provider: "c".into() });
    assert_eq!(result.attempts.len(), 3);
    assert_eq!(result.attempts[2].tier, Tier::Fallback);
    assert!(result.attempts[..2].iter().all(|attempt| !attempt.succeeded()));
}

#[tokio::test]
async fn every_provider_failing_yields_exact_static_fallback() {
    let a = ScriptedClient::failing("a");
    let c = ScriptedClient::timing_out("c");
    let registry = ModelRegistry::new()
        .with_model(Tier::Primary, a.clone())
        .with_model(Tier::Fallback, c.clone());
    let orchestrator = Orchestrator::new(Arc::new(registry), FixedGuardrail::allowing());

    for operation in [operations::MANAGER, operations::SKILL_MATCHER, "Unknown Step"] {
        let text = orchestrator
            .run(&template(), &inputs(), operation)
            .await
            .expect("exhaustion is not an error");
        assert_eq!(text, fallback::generate(operation));
    }
    assert_eq!(a.calls(), 3);
    assert_eq!(c.calls(), 3);
}

#[tokio::test]
async fn empty_registry_uses_static_fallback_without_calls() {
    let guardrail = FixedGuardrail::allowing();
    let orchestrator = Orchestrator::new(Arc::new(ModelRegistry::new()), guardrail.clone());

    let result = orchestrator
        .run_detailed(&template(), &inputs(), operations::SKILL_MATCHER)
        .await
        .expect("fallback");

    assert_eq!(result.outcome, Outcome::StaticFallback);
    assert!(result.attempts.is_empty());
    assert_eq!(result.text, fallback::generate(operations::SKILL_MATCHER));
    assert_eq!(guardrail.scans(), 0);
}

#[tokio::test]
async fn empty_registry_skips_guardrail_network_checks() {
    let classifier = ScriptedClient::replying(
        "classifier",
        r#"{"is_jailbreak": false, "confidence_score": 0.1}"#,
    );
    let guardrail = GuardrailService::new(0.8).with_classifier(classifier.clone());
    let orchestrator = Orchestrator::new(Arc::new(ModelRegistry::new()), Arc::new(guardrail));

    let text = orchestrator
        .run(&template(), &inputs(), operations::MANAGER)
        .await
        .expect("fallback");

    assert_eq!(text, fallback::generate(operations::MANAGER));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn confident_jailbreak_refuses_before_any_model_call() {
    let classifier = ScriptedClient::replying(
        "classifier",
        r#"{"is_jailbreak": true, "confidence_score": 0.95}"#,
    );
    let guardrail = GuardrailService::new(0.8).with_classifier(classifier.clone());
    let model = ScriptedClient::replying("openai", "should never be produced");
    let registry = ModelRegistry::new().with_model(Tier::Primary, model.clone());
    let orchestrator = Orchestrator::new(Arc::new(registry), Arc::new(guardrail));

    let result = orchestrator
        .run_detailed(&template(), &inputs(), operations::MANAGER)
        .await
        .expect("refusal is not an error");

    assert_eq!(result.text, GUARDRAIL_REFUSAL);
    assert_eq!(result.outcome, Outcome::Refused(GuardrailCategory::Jailbreak));
    assert_eq!(classifier.calls(), 1);
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn guardrail_scans_once_and_models_see_rendered_prompt() {
    let guardrail = FixedGuardrail::allowing();
    let model = ScriptedClient::replying("gemini", "fine");
    let registry = ModelRegistry::new().with_model(Tier::Primary, model.clone());
    let orchestrator = Orchestrator::new(Arc::new(registry), guardrail.clone())
        .with_shuffle(Arc::new(KeepOrder));

    orchestrator
        .run(&template(), &inputs(), operations::MANAGER)
        .await
        .expect("orchestration succeeds");

    assert_eq!(guardrail.scans(), 1);
    assert_eq!(
        model.prompts(),
        vec!["Critique for Data Analyst: I cleaned the dataset and built a dashboard."]
    );
}

#[tokio::test]
async fn attempts_record_bounded_previews_and_usage() {
    let long_answer = "word ".repeat(500);
    let model = ScriptedClient::replying("openai", &long_answer);
    let registry = ModelRegistry::new().with_model(Tier::Primary, model);
    let orchestrator = Orchestrator::new(Arc::new(registry), FixedGuardrail::allowing());
    let inputs = PromptInputs::new()
        .with("role", "Engineer")
        .with("student_answer", long_answer.as_str());

    let result = orchestrator
        .run_detailed(&template(), &inputs, operations::COACH)
        .await
        .expect("orchestration succeeds");

    let attempt = &result.attempts[0];
    assert!(attempt.input_preview.chars().count() <= 121);
    assert!(
        attempt
            .output_preview
            .as_ref()
            .is_some_and(|preview| preview.chars().count() <= 121)
    );
    assert_eq!(attempt.usage.map(|usage| usage.total), Some(20));
}
