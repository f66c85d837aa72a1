//! Deterministic stand-in responses for total provider outages.
//!
//! Every payload uses the field names a real completion for the same
//! operation would carry, so callers destructure it without special cases.

use serde_json::json;

use crate::constants::operations;

/// Static response for `operation`. Pure: same name, same text.
pub fn generate(operation: &str) -> String {
    let payload = match operation {
        operations::SKILL_MATCHER => json!({
            "matched_skills": [{
                "skill": "General Professionalism",
                "code": "GEN-PRO-001",
                "reason": "Resume detected, but AI deep analysis is currently offline due to high server load."
            }],
            "missing_skills": [{
                "skill": "Technical Deep Dive (System Busy)",
                "code": "ERR-503",
                "gap": "Our AI analysis servers are currently experiencing very high traffic. Please review your technical requirements against the job description manually while we cool down."
            }]
        }),
        operations::MANAGER | operations::COACH => json!({
            "manager_critique": "⚠️ **System Notification:** High Server Load. We cannot provide specific technical feedback right now.",
            "coach_critique": "Our AI Coach is currently assisting too many users. A universal tip: make sure your answer follows the STAR method strictly.",
            "rewritten_answer": "**Situation:** [Your Context] **Task:** [Your Challenge] **Action:** [Specific Steps Taken] **Result:** [Quantifiable Outcome]\n\n*(Please try again in 5 minutes for a specific rewrite.)*"
        }),
        _ => json!({
            "coach_critique": "The AI service is temporarily unavailable. Please try again shortly.",
            "rewritten_answer": "No rewrite is available while the AI service is under high load."
        }),
    };
    payload.to_string()
}
