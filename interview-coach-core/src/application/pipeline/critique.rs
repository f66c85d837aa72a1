//! Manager then Coach critique of one interview answer.

use std::sync::Arc;

use serde_json::json;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use super::{CritiquePipeline, EventSink, PipelineError, PipelineStage, StreamEvent};
use crate::application::parser::{self, PayloadKind};
use crate::application::template::PromptInputs;
use crate::constants::{CRITIQUE_RESUME_CHARS, operations, truncate_chars};
use crate::domain::types::{AnalyzeRequest, CritiqueResult, SkillData};

const NO_GAPS: &str = "No specific gaps identified.";
const NO_CRITIQUE: &str = "No critique available.";
const NO_ANSWER: &str = "No answer generated.";

/// Prior skill gaps as a compact prompt block.
pub fn format_skill_gaps(skill_data: Option<&SkillData>) -> String {
    let missing = match skill_data {
        Some(data) if !data.missing.is_empty() => &data.missing,
        _ => return NO_GAPS.to_string(),
    };
    missing
        .iter()
        .map(|gap| {
            format!(
                "- {} ({}): {}",
                gap.skill,
                gap.code.as_deref().unwrap_or("N/A"),
                gap.gap.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl CritiquePipeline {
    /// Start a critique run and return its event stream.
    pub fn analyze_stream(&self, request: AnalyzeRequest) -> ReceiverStream<StreamEvent> {
        self.spawn_run("analyze", move |pipeline, sink| async move {
            pipeline.analyze(request, &sink).await.map(|_| ())
        })
    }

    /// Run every critique stage, emitting progress to `sink`.
    pub async fn analyze(
        &self,
        request: AnalyzeRequest,
        sink: &EventSink,
    ) -> Result<CritiqueResult, PipelineError> {
        let mut stage = PipelineStage::Context;
        sink.emit(StreamEvent::step(1, "Gathering Context...")).await?;

        let skills = Arc::clone(&self.skills);
        let role = request.target_role.clone();
        let detailed_skills =
            tokio::task::spawn_blocking(move || skills.detailed_skills(&role)).await?;
        let skill_gaps = format_skill_gaps(request.skill_data.as_ref());
        let resume_excerpt = truncate_chars(&request.resume_text, CRITIQUE_RESUME_CHARS);

        sink.emit(StreamEvent::step(1, "Reading Context...")).await?;

        stage.enter(PipelineStage::ManagerAnalysis);
        sink.emit(StreamEvent::step(2, "Manager Analysis...")).await?;

        let manager_inputs = PromptInputs::new()
            .with("role", request.target_role.as_str())
            .with("detailed_skills", detailed_skills)
            .with("resume_text", resume_excerpt)
            .with("question", request.question.as_str())
            .with("skill_gaps", skill_gaps)
            .with("student_answer", request.student_answer.as_str());
        let manager_raw = self
            .orchestrator
            .run(&self.prompts.manager, &manager_inputs, operations::MANAGER)
            .await?;
        let manager = parser::split(&manager_raw);

        sink.emit(StreamEvent::partial(
            json!({ "manager_thinking": manager.reasoning }),
        ))
        .await?;

        stage.enter(PipelineStage::CoachRefinement);
        sink.emit(StreamEvent::step(3, "Coach Refinement...")).await?;

        let coach_inputs = PromptInputs::new()
            .with("manager_critique", manager.final_answer.as_str())
            .with("student_answer", request.student_answer.as_str())
            .with("star_guide_content", &*self.star_guide)
            .with("question", request.question.as_str())
            .with("resume_text", resume_excerpt);
        let coach_raw = self
            .orchestrator
            .run(&self.prompts.coach, &coach_inputs, operations::COACH)
            .await?;
        let coach = parser::split(&coach_raw);

        sink.emit(StreamEvent::partial(
            json!({ "coach_thinking": coach.reasoning }),
        ))
        .await?;

        let payload = parser::extract_json(&coach.final_answer, PayloadKind::Coaching);
        let result = CritiqueResult {
            manager_thinking: manager.reasoning,
            manager_critique: manager.final_answer,
            coach_thinking: coach.reasoning,
            coach_critique: parser::field_text(&payload, "coach_critique", NO_CRITIQUE),
            rewritten_answer: parser::field_text(&payload, "rewritten_answer", NO_ANSWER),
        };

        stage.enter(PipelineStage::Finalized);
        sink.emit(StreamEvent::result(serde_json::to_value(&result)?))
            .await?;
        info!(role = %request.target_role, "Critique delivered");
        Ok(result)
    }
}
