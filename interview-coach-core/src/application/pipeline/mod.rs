//! Streaming critique and skill-matching pipelines.
//!
//! Each run executes on its own task and reports through an [`EventSink`].
//! Failures and panics are caught at the run boundary and turned into a
//! single terminal `error` event.

mod critique;
mod events;
mod resume;
mod skill_match;

pub use events::{EventSink, StreamEvent};
pub use resume::{ResumeVerdict, UploadRejection};

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use thiserror::Error;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{Instrument, Span, debug, error, info, info_span};
use uuid::Uuid;

use super::extraction::{DocumentTextExtractor, PdfTextExtractor};
use super::orchestrator::{Orchestrator, OrchestratorError};
use super::prompts::PromptSet;
use super::redaction::{PassthroughRedactor, PiiRedactor};
use crate::constants::DEFAULT_STAR_GUIDE;
use crate::infrastructure::skills::SkillsLookup;

/// Events buffered between a run and a slow reader.
const EVENT_BUFFER: usize = 16;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Orchestration(#[from] OrchestratorError),
    #[error("skills lookup task failed: {0}")]
    Lookup(#[from] tokio::task::JoinError),
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("client disconnected")]
    Disconnected,
}

impl PipelineError {
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Orchestration(err) => err.user_message(),
            PipelineError::Lookup(_) => "Reference data could not be loaded.".to_string(),
            PipelineError::Encode(_) => "The result could not be encoded.".to_string(),
            PipelineError::Disconnected => "Client disconnected.".to_string(),
        }
    }
}

/// Where a run currently is. Recorded on the run's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Context,
    ManagerAnalysis,
    CoachRefinement,
    SkillAnalysis,
    Finalized,
    Errored,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Context => "context",
            PipelineStage::ManagerAnalysis => "manager_analysis",
            PipelineStage::CoachRefinement => "coach_refinement",
            PipelineStage::SkillAnalysis => "skill_analysis",
            PipelineStage::Finalized => "finalized",
            PipelineStage::Errored => "errored",
        }
    }

    /// Move to `next`, recording it on the current span.
    fn enter(&mut self, next: PipelineStage) {
        debug!(from = self.as_str(), to = next.as_str(), "Pipeline stage change");
        *self = next;
        Span::current().record("stage", next.as_str());
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composes skills lookup, orchestration and parsing into streamed runs.
///
/// Cheap to clone; every field is shared read-only between runs.
#[derive(Clone)]
pub struct CritiquePipeline {
    orchestrator: Orchestrator,
    skills: Arc<dyn SkillsLookup>,
    prompts: Arc<PromptSet>,
    star_guide: Arc<str>,
    redactor: Arc<dyn PiiRedactor>,
    extractor: Arc<dyn DocumentTextExtractor>,
}

impl CritiquePipeline {
    pub fn new(orchestrator: Orchestrator, skills: Arc<dyn SkillsLookup>, prompts: PromptSet) -> Self {
        Self {
            orchestrator,
            skills,
            prompts: Arc::new(prompts),
            star_guide: Arc::from(DEFAULT_STAR_GUIDE),
            redactor: Arc::new(PassthroughRedactor),
            extractor: Arc::new(PdfTextExtractor),
        }
    }

    pub fn with_star_guide(mut self, text: impl AsRef<str>) -> Self {
        self.star_guide = Arc::from(text.as_ref());
        self
    }

    pub fn with_redactor(mut self, redactor: Arc<dyn PiiRedactor>) -> Self {
        self.redactor = redactor;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentTextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn skills(&self) -> &Arc<dyn SkillsLookup> {
        &self.skills
    }

    pub fn star_guide(&self) -> &str {
        &self.star_guide
    }

    fn spawn_run<F, Fut>(&self, kind: &'static str, run: F) -> ReceiverStream<StreamEvent>
    where
        F: FnOnce(CritiquePipeline, EventSink) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), PipelineError>> + Send + 'static,
    {
        let (sink, rx) = EventSink::channel(EVENT_BUFFER);
        let pipeline = self.clone();
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline", kind, %run_id, stage = PipelineStage::Context.as_str());
        tokio::spawn(drive(sink.clone(), run(pipeline, sink)).instrument(span));
        ReceiverStream::new(rx)
    }
}

/// Run `work` to completion, converting failures into one `error` event.
async fn drive<Fut>(sink: EventSink, work: Fut)
where
    Fut: Future<Output = Result<(), PipelineError>>,
{
    info!("Pipeline run started");
    let message = match AssertUnwindSafe(work).catch_unwind().await {
        Ok(Ok(())) => {
            info!("Pipeline run finished");
            return;
        }
        Ok(Err(PipelineError::Disconnected)) => {
            info!("Client disconnected, abandoning stream");
            return;
        }
        Ok(Err(err)) => {
            error!(error = %err, "Pipeline run failed");
            err.user_message()
        }
        Err(_) => {
            error!("Pipeline run panicked");
            "An internal error occurred while processing the request.".to_string()
        }
    };
    Span::current().record("stage", PipelineStage::Errored.as_str());
    if sink.emit(StreamEvent::error(message)).await.is_err() {
        info!("Client disconnected before the error could be delivered");
    }
}
