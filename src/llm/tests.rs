use super::*;
use crate::config::{ApiKey, Config};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        gemini_api_key: Some(ApiKey::new("test-key")),
        gemini_api_url: server.uri(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_complete_returns_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {
                    "content": {"parts": [{"text": "[{\"title\": "}, {"text": "\"A\"}]"}]},
                    "finishReason": "STOP"
                },
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    let text = client.complete("Describe the Louvre").await.unwrap();

    assert_eq!(text, "[{\"title\": \"A\"}]");
}

#[tokio::test]
async fn test_prompt_is_sent_as_single_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(wiremock::matchers::body_json(json!({
            "contents": [{"parts": [{"text": "hello"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.complete("hello").await.unwrap(), "ok");
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let cases = [
        (401, LLMError::Authentication),
        (403, LLMError::Forbidden),
        (429, LLMError::RateLimited),
        (
            503,
            LLMError::Server {
                status: 503,
                body: "overloaded".to_string(),
            },
        ),
        (
            400,
            LLMError::Http {
                status: 400,
                body: "overloaded".to_string(),
            },
        ),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config_for(&server)).unwrap();
        let err = client.complete("prompt").await.unwrap_err();
        assert_eq!(err, expected, "status {}", status);
    }
}

#[tokio::test]
async fn test_empty_candidates_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    assert_eq!(
        client.complete("prompt").await.unwrap_err(),
        LLMError::EmptyResponse
    );
}

#[tokio::test]
async fn test_blocked_candidate_reports_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    assert_eq!(
        client.complete("prompt").await.unwrap_err(),
        LLMError::Blocked("SAFETY".to_string())
    );
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config_for(&server)).unwrap();
    assert!(matches!(
        client.complete("prompt").await,
        Err(LLMError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_missing_key_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        gemini_api_key: None,
        ..config_for(&server)
    };
    let client = GeminiClient::new(&config).unwrap();

    assert_eq!(
        client.complete("prompt").await.unwrap_err(),
        LLMError::MissingApiKey
    );
}

#[test]
fn test_error_messages_are_human_readable() {
    assert_eq!(
        LLMError::from_status(401, String::new()).to_string(),
        "Authentication failed - check your API key"
    );
    assert_eq!(
        LLMError::from_status(502, "bad gateway".to_string()).to_string(),
        "Server error (502): bad gateway"
    );
}
