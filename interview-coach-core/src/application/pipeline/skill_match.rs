//! Resume against role competencies.

use std::sync::Arc;

use serde_json::Value;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use super::{CritiquePipeline, EventSink, PipelineError, PipelineStage, StreamEvent};
use crate::application::parser::{self, PayloadKind};
use crate::application::template::PromptInputs;
use crate::constants::{MATCH_RESUME_CHARS, operations, truncate_chars};
use crate::domain::types::MatchRequest;

impl CritiquePipeline {
    /// Start a skill-matching run and return its event stream.
    pub fn match_skills_stream(&self, request: MatchRequest) -> ReceiverStream<StreamEvent> {
        self.spawn_run("match_skills", move |pipeline, sink| async move {
            pipeline.match_skills(request, &sink).await.map(|_| ())
        })
    }

    /// Compare a resume with the role's competency rows.
    ///
    /// Returns the object sent in the `result` event.
    pub async fn match_skills(
        &self,
        request: MatchRequest,
        sink: &EventSink,
    ) -> Result<Value, PipelineError> {
        let mut stage = PipelineStage::Context;
        let role = request.target_role.as_str();
        info!(role, "Starting skill match analysis");

        sink.emit(StreamEvent::status(1, format!("Querying DB for '{role}'...")))
            .await?;
        let skills = Arc::clone(&self.skills);
        let lookup_role = role.to_string();
        let records =
            tokio::task::spawn_blocking(move || skills.match_skills_data(&lookup_role)).await?;
        sink.emit(StreamEvent::status(
            1,
            format!("✔ Found {} core competencies.", records.len()),
        ))
        .await?;

        stage.enter(PipelineStage::SkillAnalysis);
        sink.emit(StreamEvent::status(
            2,
            "Anonymizing data & Initializing AI Analyst...",
        ))
        .await?;
        let redacted = self
            .redactor
            .redact(truncate_chars(&request.resume_text, MATCH_RESUME_CHARS));
        let resume = truncate_chars(&redacted, MATCH_RESUME_CHARS);

        sink.emit(StreamEvent::status(2, "Reading resume work history..."))
            .await?;
        sink.emit(StreamEvent::status(2, "Mapping skills to gaps..."))
            .await?;

        let inputs = PromptInputs::new()
            .with("role", role)
            .with("role_desc", format!("Professional {role}"))
            .with("detailed_skills", serde_json::to_string_pretty(&records)?)
            .with("resume_text", resume);
        let raw = self
            .orchestrator
            .run(&self.prompts.match_skills, &inputs, operations::SKILL_MATCHER)
            .await?;

        sink.emit(StreamEvent::status(3, "Formatting final JSON report..."))
            .await?;
        let payload = Value::Object(parser::extract_json(&raw, PayloadKind::SkillMatch));

        stage.enter(PipelineStage::Finalized);
        sink.emit(StreamEvent::result(payload.clone())).await?;
        info!(role, "Skill match delivered");
        Ok(payload)
    }
}
