//! Application constants
//!
//! Single source of truth for paths, sentinels and other fixed strings.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/coach.toml";

/// Environment files loaded before configuration is read, in order
pub const ENV_PATHS: [&str; 2] = ["config/.env", ".env"];

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Default OpenAI-compatible chat path
pub const DEFAULT_OPENAI_API_PATH: &str = "/v1/chat/completions";

/// Moderation endpoint path used by the toxicity check
pub const MODERATION_API_PATH: &str = "/v1/moderations";

/// Text returned instead of a model completion when the guardrail blocks a request
pub const GUARDRAIL_REFUSAL: &str =
    "I cannot process this request because it violates our safety guidelines.";

/// Reasoning placeholder when a completion carries no thinking block
pub const NO_TRACE: &str = "No thinking trace provided by AI.";

/// Reasoning placeholder when the thinking block was promoted to the answer
pub const TRACE_REUSED: &str = "Thinking trace reused as the final answer.";

/// Style guide used when no guide file can be read
pub const DEFAULT_STAR_GUIDE: &str = "Standard STAR Method principles.";

/// Maximum characters of any payload written to logs
pub const PREVIEW_CHARS: usize = 120;

/// Resume characters bound into the critique prompts
pub const CRITIQUE_RESUME_CHARS: usize = 10_000;

/// Resume characters bound into the skill-matching prompt
pub const MATCH_RESUME_CHARS: usize = 5_000;

/// Largest accepted resume upload
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Extracted text shorter than this is treated as a scanned image
pub const MIN_EXTRACTED_CHARS: usize = 50;

/// Extracted characters returned to the uploader
pub const UPLOAD_TEXT_CHARS: usize = 10_000;

/// Document characters shown to the resume validator
pub const VALIDATION_RESUME_CHARS: usize = 3_000;

/// Operation names understood by the static fallback table
pub mod operations {
    pub const MANAGER: &str = "Manager Agent";
    pub const COACH: &str = "Coach Agent";
    pub const SKILL_MATCHER: &str = "Skill Matcher";
    pub const RESUME_VALIDATOR: &str = "Resume Validator";
}

/// Truncate `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Bounded, single-line preview of `text` for log fields.
pub fn preview(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    let cut = truncate_chars(&flat, PREVIEW_CHARS);
    if cut.len() < flat.len() {
        format!("{cut}…")
    } else {
        cut.to_string()
    }
}
