use std::time::Duration;

use interview_coach_core::model::clients::{ClientSettings, GeminiClient, OpenAIClient, OpenAiModerator};
use interview_coach_core::model::{ModelClient, ModelError, ModelRequest, ModerationClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer, model: &str) -> ClientSettings {
    ClientSettings::new("test-provider", server.uri(), "sk-test", model)
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn openai_parses_content_and_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Critique this."}],
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "Needs more detail." } }],
            "usage": { "prompt_tokens": 11, "completion_tokens": 4, "total_tokens": 15 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAIClient::new(settings(&server, "gpt-4o-mini")).expect("client builds");
    let response = client
        .generate(ModelRequest::new("Critique this."))
        .await
        .expect("generation succeeds");

    assert_eq!(response.content, "Needs more detail.");
    let usage = response.usage.expect("usage reported");
    assert_eq!((usage.input, usage.output, usage.total), (11, 4, 15));
}

#[tokio::test]
async fn openai_json_mode_requests_json_object_with_system_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "response_format": { "type": "json_object" },
            "messages": [
                {"role": "system", "content": "Classify."},
                {"role": "user", "content": "hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "{\"is_jailbreak\": false}" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAIClient::new(settings(&server, "gpt-4o-mini")).expect("client builds");
    let response = client
        .generate(ModelRequest::new("hello").with_system("Classify.").json())
        .await
        .expect("generation succeeds");

    assert_eq!(response.content, "{\"is_jailbreak\": false}");
    assert!(response.usage.is_none());
}

#[tokio::test]
async fn custom_api_path_replaces_chat_completions_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/coach/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "Routed." } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAIClient::new(
        settings(&server, "gpt-4o-mini").with_api_path("/openai/deployments/coach/chat/completions"),
    )
    .expect("client builds");
    let response = client
        .generate(ModelRequest::new("hi"))
        .await
        .expect("generation succeeds");

    assert_eq!(response.content, "Routed.");
}

#[tokio::test]
async fn quota_exhaustion_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = OpenAIClient::new(settings(&server, "gpt-4o-mini")).expect("client builds");
    let err = client
        .generate(ModelRequest::new("hi"))
        .await
        .expect_err("429 is an error");

    assert_eq!(err.kind(), "quota");
    match err {
        ModelError::Status { body, .. } => assert_eq!(body, "rate limited"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let client = OpenAIClient::new(
        settings(&server, "gpt-4o-mini").with_timeout(Duration::from_millis(50)),
    )
    .expect("client builds");
    let err = client
        .generate(ModelRequest::new("hi"))
        .await
        .expect_err("times out");

    assert!(matches!(err, ModelError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn empty_choices_are_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = OpenAIClient::new(settings(&server, "gpt-4o-mini")).expect("client builds");
    let err = client.generate(ModelRequest::new("hi")).await.unwrap_err();
    assert_eq!(err.kind(), "invalid_response");
}

#[tokio::test]
async fn gemini_uses_query_key_and_reads_usage_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "sk-test"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Critique this."}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "<thinking>x</thinking>" }, { "text": "Good." }] }
            }],
            "usageMetadata": {
                "promptTokenCount": 20,
                "candidatesTokenCount": 5,
                "totalTokenCount": 25
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(settings(&server, "gemini-2.5-flash")).expect("client builds");
    let response = client
        .generate(ModelRequest::new("Critique this."))
        .await
        .expect("generation succeeds");

    assert_eq!(response.content, "<thinking>x</thinking>Good.");
    assert_eq!(response.usage.map(|usage| usage.total), Some(25));
}

#[tokio::test]
async fn gemini_sets_json_mime_type_only_in_json_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" },
            "system_instruction": { "parts": [{ "text": "Be strict." }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(settings(&server, "gemini-2.5-flash")).expect("client builds");
    client
        .generate(ModelRequest::new("x").with_system("Be strict.").json())
        .await
        .expect("json mode request matches");
}

#[tokio::test]
async fn moderation_reports_flagged_categories() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/moderations"))
        .and(body_partial_json(json!({ "input": "you are useless" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "flagged": true,
                "categories": { "harassment": true, "violence": false }
            }]
        })))
        .mount(&server)
        .await;

    let moderator = OpenAiModerator::new(settings(&server, "")).expect("client builds");
    let result = moderator
        .moderate("you are useless")
        .await
        .expect("moderation succeeds");

    assert!(result.flagged);
    assert_eq!(result.categories, vec!["harassment".to_string()]);
}
