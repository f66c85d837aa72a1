//! Model client implementations

mod base;
mod gemini;
mod moderation;
mod openai;

pub use base::{ClientSettings, HttpClientBase};
pub use gemini::GeminiClient;
pub use moderation::OpenAiModerator;
pub use openai::OpenAIClient;
