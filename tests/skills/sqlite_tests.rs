use std::path::PathBuf;

use interview_coach_core::domain::types::SkillRecord;
use interview_coach_core::skills::{SkillsLookup, SqliteSkillsLookup};
use rusqlite::{Connection, params};
use tempfile::TempDir;

const SCHEMA: &str = r#"
CREATE TABLE role_skills (role TEXT, skill_code TEXT, skill_title TEXT, proficiency);
CREATE TABLE skill_definitions (skill_code TEXT PRIMARY KEY, title TEXT, description TEXT);
CREATE TABLE skill_details (skill_code TEXT, detail_item TEXT);
CREATE TABLE role_descriptions (role TEXT, description TEXT, expectations TEXT);
CREATE TABLE saved_questions (id INTEGER PRIMARY KEY, question_text TEXT);
"#;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("skills.db");
        let conn = Connection::open(&path).expect("create database");
        conn.execute_batch(SCHEMA).expect("create schema");
        Self { _dir: dir, path }
    }

    fn conn(&self) -> Connection {
        Connection::open(&self.path).expect("open database")
    }

    fn lookup(&self) -> SqliteSkillsLookup {
        SqliteSkillsLookup::new(&self.path)
    }
}

fn add_skill(conn: &Connection, role: &str, code: &str, title: &str, level: i64, details: &[&str]) {
    conn.execute(
        "INSERT INTO role_skills (role, skill_code, skill_title, proficiency) VALUES (?1, ?2, ?3, ?4)",
        params![role, code, title, level],
    )
    .expect("insert role skill");
    conn.execute(
        "INSERT INTO skill_definitions (skill_code, title, description) VALUES (?1, ?2, ?3)",
        params![code, title, format!("{title} description")],
    )
    .expect("insert definition");
    for detail in details {
        conn.execute(
            "INSERT INTO skill_details (skill_code, detail_item) VALUES (?1, ?2)",
            params![code, detail],
        )
        .expect("insert detail");
    }
}

#[test]
fn detailed_skills_formats_specification_block() {
    let fixture = Fixture::new();
    add_skill(
        &fixture.conn(),
        "Software Engineer",
        "ICT-SWE-001",
        "Software Design",
        5,
        &["Design patterns"],
    );

    let text = fixture.lookup().detailed_skills("Software Engineer");

    let expected = format!(
        "OFFICIAL SPECIFICATION FOR ROLE: SOFTWARE ENGINEER\n{}\n\n\
         Ref Code: [ICT-SWE-001]\n\
         Skill Title: Software Design\n\
         Required Level: 5\n\
         Key Knowledge: Design patterns...\n\
         {}\n",
        "=".repeat(40),
        "-".repeat(20)
    );
    assert_eq!(text, expected);
}

#[test]
fn detailed_skills_caps_rows_and_knowledge_length() {
    let fixture = Fixture::new();
    let conn = fixture.conn();
    let long_detail = "k".repeat(450);
    for n in 0..9 {
        add_skill(
            &conn,
            "Data Engineer",
            &format!("ICT-DE-{n:03}"),
            &format!("Skill {n}"),
            3,
            &[long_detail.as_str()],
        );
    }

    let text = fixture.lookup().detailed_skills("Data Engineer");
    assert_eq!(text.matches("Ref Code: [").count(), 6);
    let knowledge_line = text
        .lines()
        .find(|line| line.starts_with("Key Knowledge: "))
        .expect("knowledge line");
    assert_eq!(knowledge_line, format!("Key Knowledge: {}...", "k".repeat(200)));

    let records = fixture.lookup().match_skills_data("Data Engineer");
    assert_eq!(records.len(), 8);
    assert!(
        records
            .iter()
            .all(|record| record.required_knowledge == format!("{}...", "k".repeat(300)))
    );
}

#[test]
fn match_skills_data_falls_back_to_role_skill_title() {
    let fixture = Fixture::new();
    let conn = fixture.conn();
    add_skill(&conn, "Analyst", "ICT-AN-001", "Data Modelling", 4, &[]);
    conn.execute(
        "INSERT INTO role_skills (role, skill_code, skill_title, proficiency) VALUES ('Analyst', 'ICT-AN-999', 'Stakeholder Mapping', NULL)",
        [],
    )
    .expect("insert undefined skill");

    let mut records = fixture.lookup().match_skills_data("Analyst");
    records.sort_by(|a, b| a.code.cmp(&b.code));

    assert_eq!(
        records,
        vec![
            SkillRecord {
                skill: "Data Modelling".to_string(),
                code: "ICT-AN-001".to_string(),
                level: "4".to_string(),
                required_knowledge: "General competency".to_string(),
            },
            SkillRecord {
                skill: "Stakeholder Mapping".to_string(),
                code: "ICT-AN-999".to_string(),
                level: "Standard".to_string(),
                required_knowledge: "General competency".to_string(),
            },
        ]
    );
}

#[test]
fn unknown_role_uses_generic_placeholders() {
    let fixture = Fixture::new();
    let lookup = fixture.lookup();

    assert_eq!(
        lookup.detailed_skills("Astronaut"),
        "Standard industry spec for Astronaut (No specific DB entry)."
    );
    assert_eq!(lookup.match_skills_data("Astronaut"), vec![SkillRecord::general()]);
}

#[test]
fn roles_are_distinct_and_sorted() {
    let fixture = Fixture::new();
    fixture
        .conn()
        .execute_batch(
            "INSERT INTO role_descriptions VALUES ('Web Developer', 'd', 'e');
             INSERT INTO role_descriptions VALUES ('Analyst', 'd', 'e');
             INSERT INTO role_descriptions VALUES ('Web Developer', 'd2', 'e2');",
        )
        .expect("insert roles");

    assert_eq!(fixture.lookup().roles(), vec!["Analyst", "Web Developer"]);
}

#[test]
fn questions_are_ordered_by_id() {
    let fixture = Fixture::new();
    fixture
        .conn()
        .execute_batch(
            "INSERT INTO saved_questions VALUES (7, 'Describe a failure.');
             INSERT INTO saved_questions VALUES (2, 'Tell me about yourself.');",
        )
        .expect("insert questions");

    let questions = fixture.lookup().questions();
    let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![2, 7]);
    assert_eq!(questions[0].text, "Tell me about yourself.");
}

#[test]
fn missing_tables_degrade_like_missing_database() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("empty.db");
    Connection::open(&path).expect("create database");
    let lookup = SqliteSkillsLookup::new(&path);

    assert_eq!(lookup.detailed_skills("Analyst"), "Standard industry skills.");
    assert_eq!(lookup.match_skills_data("Analyst"), vec![SkillRecord::general()]);
    assert!(lookup.roles().is_empty());
    assert!(lookup.questions().is_empty());
}
