use std::fs;
use std::path::Path;

use interview_coach_core::application::prompts::{MANAGER_PROMPT, PromptSet};
use interview_coach_core::config::{AppConfig, ConfigError, Tier};
use interview_coach_core::build_pipeline;
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:9100"
cors_origins = ["https://coach.example.org"]
secret_header = "X-Coach-Secret"
secret_env = "COACH_SECRET"

[resources]
database = "/srv/coach/skills.db"
star_guide = "/srv/coach/star_guide.txt"

[guardrail]
enabled = false
jailbreak_threshold = 0.9

[prompts]
coach = "Coach {student_answer} using {star_guide_content}"

[[providers]]
id = "openai"
type = "openai"
tier = 1
endpoint = "https://api.openai.com"
api_key = "OPENAI_API_KEY"
model = "gpt-4o-mini"

[[providers]]
id = "groq"
tier = 2
endpoint = "https://api.groq.com/openai"
api_key = "GROQ_API_KEY"
model = "llama-3.3-70b-versatile"
timeout_secs = 20
"#;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("coach.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn full_config_file_loads_every_section() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, FULL_CONFIG);

    let config = AppConfig::load(Some(&path)).expect("config loads");

    assert_eq!(config.server.bind.to_string(), "127.0.0.1:9100");
    assert_eq!(config.server.secret_header, "x-coach-secret");
    assert_eq!(config.server.cors_origins, vec!["https://coach.example.org"]);
    assert_eq!(config.resources.database, Path::new("/srv/coach/skills.db"));
    assert!(!config.guardrail.enabled);
    assert_eq!(config.guardrail.jailbreak_threshold, 0.9);

    assert_eq!(config.providers.len(), 2);
    assert_eq!(config.providers[0].tier, Tier::Primary);
    assert_eq!(config.providers[1].tier, Tier::Fallback);
    assert_eq!(config.providers[1].provider_type, "openai");
    assert_eq!(config.providers[1].timeout_secs, 20);

    let prompts = PromptSet::with_overrides(&config.prompts).expect("prompts parse");
    assert_eq!(prompts.coach.variables(), vec!["student_answer", "star_guide_content"]);
    assert_eq!(prompts.manager.source(), MANAGER_PROMPT);
}

#[test]
fn explicit_missing_path_is_an_error_even_with_defaults() {
    let missing = Path::new("/nonexistent/interview-coach/coach.toml");
    assert!(matches!(
        AppConfig::load_or_default(Some(missing)),
        Err(ConfigError::NotFound { .. })
    ));
}

#[test]
fn malformed_toml_reports_parse_error_with_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[server\nbind = ");

    match AppConfig::load(Some(&path)) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn invalid_tier_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
[[providers]]
id = "x"
tier = 3
endpoint = "http://localhost"
model = "m"
"#,
    );

    assert!(matches!(
        AppConfig::load(Some(&path)),
        Err(ConfigError::InvalidTier { tier: 3, .. })
    ));
}

#[test]
fn defaults_mirror_the_reference_deployment() {
    let config = AppConfig::default();
    let tiers: Vec<(&str, Tier)> = config
        .providers
        .iter()
        .map(|provider| (provider.id.as_str(), provider.tier))
        .collect();
    assert_eq!(
        tiers,
        vec![
            ("gemini", Tier::Primary),
            ("openai", Tier::Primary),
            ("groq", Tier::Fallback)
        ]
    );
    assert_eq!(config.server.secret_header, "x-poly-secret");
}

#[tokio::test]
async fn pipeline_builds_from_config_without_providers() {
    let dir = TempDir::new().expect("temp dir");
    let guide = dir.path().join("guide.txt");
    fs::write(&guide, "Lead with the Situation.").expect("write guide");
    let content = format!(
        r#"
providers = []

[resources]
database = "{}"
star_guide = "{}"

[guardrail]
enabled = false
"#,
        dir.path().join("missing.db").display(),
        guide.display()
    );
    let path = write_config(&dir, &content);

    let config = AppConfig::load(Some(&path)).expect("config loads");
    let pipeline = build_pipeline(&config).expect("pipeline builds");

    assert_eq!(pipeline.star_guide(), "Lead with the Situation.");
    assert_eq!(
        pipeline.skills().detailed_skills("Engineer"),
        "Standard industry skills."
    );
}
