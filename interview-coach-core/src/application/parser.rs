//! Completion post-processing.
//!
//! [`split`] separates a `<thinking>` block from the answer addressed to the
//! user. [`extract_json`] pulls a JSON object out of chatty, fenced model
//! output and never fails: unusable text degrades to a default object of the
//! shape the caller asked for.

use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::constants::{GUARDRAIL_REFUSAL, NO_TRACE, TRACE_REUSED, preview, truncate_chars};

const OPEN_TAG: &str = "<thinking>";
const CLOSE_TAG: &str = "</thinking>";

/// Raw characters kept when unparseable text is surfaced as a rewritten answer.
const RAW_CONTEXT_CHARS: usize = 500;

/// A completion split into its reasoning trace and its final answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub reasoning: String,
    pub final_answer: String,
}

/// Split the first `<thinking>...</thinking>` region out of `raw`.
pub fn split(raw: &str) -> ParsedResponse {
    let region = raw.find(OPEN_TAG).and_then(|start| {
        let body_start = start + OPEN_TAG.len();
        raw[body_start..]
            .find(CLOSE_TAG)
            .map(|rel| (start, body_start, body_start + rel))
    });

    let Some((start, body_start, body_end)) = region else {
        return ParsedResponse {
            reasoning: NO_TRACE.to_string(),
            final_answer: raw.trim().to_string(),
        };
    };

    let reasoning = raw[body_start..body_end].trim().to_string();
    let remainder = format!("{}{}", &raw[..start], &raw[body_end + CLOSE_TAG.len()..]);
    let final_answer = remainder.trim().to_string();

    if final_answer.is_empty() {
        return ParsedResponse {
            reasoning: TRACE_REUSED.to_string(),
            final_answer: reasoning,
        };
    }

    ParsedResponse {
        reasoning,
        final_answer,
    }
}

/// The object shape a caller destructures, which selects the default object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// `{coach_critique, rewritten_answer}`
    Coaching,
    /// `{matched_skills, missing_skills}`
    SkillMatch,
    /// `{isValid, reason}`
    ResumeCheck,
}

/// Extract the JSON object embedded in `text`, or a default of shape `kind`.
pub fn extract_json(text: &str, kind: PayloadKind) -> Map<String, Value> {
    let trimmed = text.trim();

    if trimmed == GUARDRAIL_REFUSAL {
        info!("Guardrail refusal mapped to blocked payload");
        return blocked_payload();
    }

    if let Some(object) = parse_object(trimmed) {
        return object;
    }

    let unfenced = strip_fences(trimmed);
    let candidate = match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&unfenced[start..=end]),
        _ => None,
    };

    match candidate.and_then(parse_object) {
        Some(object) => {
            debug!("JSON object recovered from model output");
            object
        }
        None => {
            warn!(raw = %preview(trimmed), "Model output did not contain a JSON object");
            parse_failure_payload(kind, trimmed)
        }
    }
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        if rest.get(..4).is_some_and(|tag| tag.eq_ignore_ascii_case("json")) {
            rest = &rest[4..];
        }
    }
    out.push_str(rest);
    out
}

fn blocked_payload() -> Map<String, Value> {
    object(json!({
        "coach_critique": "🚫 REQUEST BLOCKED: Your input was flagged by our safety guidelines.",
        "rewritten_answer": "Your input was flagged by our safety guidelines. Please try again with professional language.",
        "matched_skills": [],
        "missing_skills": [],
        "blocked": true
    }))
}

fn parse_failure_payload(kind: PayloadKind, raw: &str) -> Map<String, Value> {
    match kind {
        PayloadKind::Coaching => object(json!({
            "coach_critique": "Could not parse AI response.",
            "rewritten_answer": truncate_chars(raw, RAW_CONTEXT_CHARS),
        })),
        PayloadKind::SkillMatch => object(json!({
            "matched_skills": [],
            "missing_skills": [{
                "skill": "Error",
                "code": "N/A",
                "gap": "AI Analysis failed to parse."
            }],
            "raw": truncate_chars(raw, RAW_CONTEXT_CHARS),
        })),
        PayloadKind::ResumeCheck => object(json!({
            "isValid": true,
            "reason": "Could not parse AI response.",
            "raw": truncate_chars(raw, RAW_CONTEXT_CHARS),
        })),
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Read a string field, rendering non-string values as JSON text.
pub fn field_text(payload: &Map<String, Value>, key: &str, default: &str) -> String {
    match payload.get(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::String(_)) | Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}
