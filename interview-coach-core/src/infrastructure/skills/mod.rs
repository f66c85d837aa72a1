//! Role and competency reference data.
//!
//! Lookups are synchronous and may be slow; async callers dispatch them with
//! `spawn_blocking`. They never fail: missing data and storage errors both
//! degrade to generic reference text.

mod sqlite;

pub use sqlite::SqliteSkillsLookup;

use crate::domain::types::{InterviewQuestion, SkillRecord};

pub trait SkillsLookup: Send + Sync {
    /// Competency specification for `role`, formatted for a prompt.
    fn detailed_skills(&self, role: &str) -> String;

    /// Competency rows for `role`, never empty on success.
    fn match_skills_data(&self, role: &str) -> Vec<SkillRecord>;

    fn roles(&self) -> Vec<String>;

    fn questions(&self) -> Vec<InterviewQuestion>;
}
