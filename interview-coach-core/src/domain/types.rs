//! Request and payload types shared by the pipelines and the REST layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A skill the candidate was previously found to be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SkillGap {
    pub skill: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub gap: Option<String>,
}

/// Output of an earlier skill-matching run, fed back into the critique.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SkillData {
    #[serde(default)]
    pub missing: Vec<SkillGap>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub matched: Vec<serde_json::Value>,
}

/// Input of the two-stage critique pipeline.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub student_answer: String,
    pub question: String,
    pub target_role: String,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub skill_data: Option<SkillData>,
}

/// Input of the skill-matching pipeline.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MatchRequest {
    pub resume_text: String,
    #[serde(default = "default_role")]
    pub target_role: String,
}

fn default_role() -> String {
    "Software Engineer".to_string()
}

/// One competency row used as the source of truth for skill matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SkillRecord {
    pub skill: String,
    pub code: String,
    pub level: String,
    pub required_knowledge: String,
}

impl SkillRecord {
    /// Placeholder row used when a role has no competencies on record.
    pub fn general() -> Self {
        Self {
            skill: "General Competency".to_string(),
            code: "N/A".to_string(),
            level: "Standard".to_string(),
            required_knowledge: "General professional skills".to_string(),
        }
    }
}

/// A saved interview question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct InterviewQuestion {
    pub id: i64,
    pub text: String,
}

/// Final payload of the critique pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CritiqueResult {
    pub manager_thinking: String,
    pub manager_critique: String,
    pub coach_thinking: String,
    pub coach_critique: String,
    pub rewritten_answer: String,
}

/// Whether an uploaded resume yielded usable text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Success,
    PartialSuccess,
}

/// Reply to a resume upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ResumeUpload {
    pub filename: String,
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub extracted_text: String,
}
