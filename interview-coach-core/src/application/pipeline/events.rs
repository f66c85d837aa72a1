//! NDJSON stream events and the channel they travel through.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use super::PipelineError;

/// One line of a streamed response.
///
/// A stream carries any number of progress events and ends with exactly one
/// [`StreamEvent::Result`] or [`StreamEvent::Error`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Critique pipeline progress
    Step { step_id: u8, message: String },
    /// Skill-matching progress
    Status { step: u8, message: String },
    PartialUpdate { data: Value },
    Result { data: Value },
    Error { message: String },
}

impl StreamEvent {
    pub fn step(step_id: u8, message: impl Into<String>) -> Self {
        Self::Step {
            step_id,
            message: message.into(),
        }
    }

    pub fn status(step: u8, message: impl Into<String>) -> Self {
        Self::Status {
            step,
            message: message.into(),
        }
    }

    pub fn partial(data: Value) -> Self {
        Self::PartialUpdate { data }
    }

    pub fn result(data: Value) -> Self {
        Self::Result { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Result { .. } | Self::Error { .. })
    }

    /// Serialized form followed by a newline.
    pub fn to_ndjson(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Sending half of an event stream.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<StreamEvent>,
}

impl EventSink {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<StreamEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Deliver `event`. Fails only when the receiving side is gone.
    pub async fn emit(&self, event: StreamEvent) -> Result<(), PipelineError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| PipelineError::Disconnected)
    }
}
