use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params};
use thiserror::Error;
use tracing::{error, info, warn};

use super::SkillsLookup;
use crate::constants::truncate_chars;
use crate::domain::types::{InterviewQuestion, SkillRecord};

const DETAILED_SKILLS_LIMIT: i64 = 6;
const MATCH_SKILLS_LIMIT: i64 = 8;
const DETAILED_KNOWLEDGE_CHARS: usize = 200;
const MATCH_KNOWLEDGE_CHARS: usize = 300;

const DETAILED_SKILLS_QUERY: &str = r#"
    SELECT
        s.title,
        s.skill_code,
        rs.proficiency,
        GROUP_CONCAT(d.detail_item, '; ') AS knowledge_list
    FROM role_skills rs
    JOIN skill_definitions s ON rs.skill_code = s.skill_code
    LEFT JOIN skill_details d ON s.skill_code = d.skill_code
    WHERE rs.role = ?1
    GROUP BY s.skill_code
    LIMIT ?2
"#;

const MATCH_SKILLS_QUERY: &str = r#"
    SELECT
        COALESCE(s.title, rs.skill_title) AS title,
        rs.skill_code,
        rs.proficiency,
        GROUP_CONCAT(d.detail_item, '; ') AS knowledge_list
    FROM role_skills rs
    LEFT JOIN skill_definitions s ON rs.skill_code = s.skill_code
    LEFT JOIN skill_details d ON rs.skill_code = d.skill_code
    WHERE rs.role = ?1
    GROUP BY rs.skill_code
    LIMIT ?2
"#;

#[derive(Debug, Error)]
enum LookupError {
    #[error("cannot open skills database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error(transparent)]
    Query(#[from] rusqlite::Error),
}

struct SkillRow {
    title: Option<String>,
    code: String,
    proficiency: Option<String>,
    knowledge: Option<String>,
}

/// Skills lookup over the relational skills database.
///
/// Opens a read-only connection per call, so one instance can be shared
/// across blocking tasks.
#[derive(Debug, Clone)]
pub struct SqliteSkillsLookup {
    path: PathBuf,
}

impl SqliteSkillsLookup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            warn!(path = %path.display(), "Skills database not found, lookups will use generic data");
        }
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, LookupError> {
        Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
            |source| LookupError::Open {
                path: self.path.clone(),
                source,
            },
        )
    }

    fn skill_rows(&self, query: &str, role: &str, limit: i64) -> Result<Vec<SkillRow>, LookupError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(query)?;
        let rows = stmt.query_map(params![role, limit], |row| {
            Ok(SkillRow {
                title: row.get(0)?,
                code: row.get(1)?,
                proficiency: row.get::<_, Value>(2).map(level_text)?,
                knowledge: row.get(3)?,
            })
        })?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn try_roles(&self) -> Result<Vec<String>, LookupError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT DISTINCT role FROM role_descriptions ORDER BY role ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut roles = Vec::new();
        for row in rows {
            roles.push(row?);
        }
        Ok(roles)
    }

    fn try_questions(&self) -> Result<Vec<InterviewQuestion>, LookupError> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT id, question_text FROM saved_questions ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(InterviewQuestion {
                id: row.get(0)?,
                text: row.get(1)?,
            })
        })?;
        let mut questions = Vec::new();
        for row in rows {
            questions.push(row?);
        }
        Ok(questions)
    }
}

fn knowledge_excerpt(knowledge: Option<&str>, max_chars: usize, default: &str) -> String {
    match knowledge.filter(|k| !k.is_empty()) {
        Some(text) => format!("{}...", truncate_chars(text, max_chars)),
        None => default.to_string(),
    }
}

/// Proficiency is stored as text in some taxonomies and as an integer in others.
fn level_text(value: Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text),
        Value::Integer(level) => Some(level.to_string()),
        Value::Real(level) => Some(level.to_string()),
        Value::Null | Value::Blob(_) => None,
    }
}

fn level_of(proficiency: Option<String>) -> String {
    proficiency
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "Standard".to_string())
}

fn format_specification(role: &str, rows: Vec<SkillRow>) -> String {
    let mut text = format!("OFFICIAL SPECIFICATION FOR ROLE: {}\n", role.to_uppercase());
    text.push_str(&"=".repeat(40));
    text.push_str("\n\n");
    for row in rows {
        let knowledge = knowledge_excerpt(
            row.knowledge.as_deref(),
            DETAILED_KNOWLEDGE_CHARS,
            "General application",
        );
        text.push_str(&format!("Ref Code: [{}]\n", row.code));
        text.push_str(&format!("Skill Title: {}\n", row.title.unwrap_or_default()));
        text.push_str(&format!("Required Level: {}\n", level_of(row.proficiency)));
        text.push_str(&format!("Key Knowledge: {knowledge}\n"));
        text.push_str(&"-".repeat(20));
        text.push('\n');
    }
    text
}

impl SkillsLookup for SqliteSkillsLookup {
    fn detailed_skills(&self, role: &str) -> String {
        info!(role, "Fetching detailed skills specification");
        match self.skill_rows(DETAILED_SKILLS_QUERY, role, DETAILED_SKILLS_LIMIT) {
            Ok(rows) if rows.is_empty() => {
                format!("Standard industry spec for {role} (No specific DB entry).")
            }
            Ok(rows) => format_specification(role, rows),
            Err(err) => {
                error!(role, %err, "Error fetching skills");
                "Standard industry skills.".to_string()
            }
        }
    }

    fn match_skills_data(&self, role: &str) -> Vec<SkillRecord> {
        let rows = match self.skill_rows(MATCH_SKILLS_QUERY, role, MATCH_SKILLS_LIMIT) {
            Ok(rows) => rows,
            Err(err) => {
                error!(role, %err, "Error fetching skill rows");
                return vec![SkillRecord::general()];
            }
        };

        let records: Vec<SkillRecord> = rows
            .into_iter()
            .map(|row| SkillRecord {
                skill: row.title.unwrap_or_else(|| row.code.clone()),
                code: row.code,
                level: level_of(row.proficiency),
                required_knowledge: knowledge_excerpt(
                    row.knowledge.as_deref(),
                    MATCH_KNOWLEDGE_CHARS,
                    "General competency",
                ),
            })
            .collect();

        if records.is_empty() {
            warn!(role, "No skills found, using default competency");
            return vec![SkillRecord::general()];
        }
        records
    }

    fn roles(&self) -> Vec<String> {
        self.try_roles().unwrap_or_else(|err| {
            error!(%err, "Error fetching roles");
            Vec::new()
        })
    }

    fn questions(&self) -> Vec<InterviewQuestion> {
        self.try_questions().unwrap_or_else(|err| {
            error!(%err, "Error fetching questions");
            Vec::new()
        })
    }
}
