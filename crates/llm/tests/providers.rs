//! HTTP-level tests for both provider adapters against a local mock server.

use llm::{build_provider, AnthropicProvider, GeminiProvider, ProviderConfig, ProviderKind};
use pipeline::{CompletionRequest, LlmError, LlmProvider, ModelName, ResponseFormat};
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn json_request(prompt: &str) -> CompletionRequest {
    CompletionRequest {
        system: Some("Reply with JSON.".to_string()),
        prompt: prompt.to_string(),
        max_output_tokens: 256,
        response_format: ResponseFormat::Json,
    }
}

fn anthropic(server: &MockServer) -> AnthropicProvider {
    AnthropicProvider::new("test-key")
        .unwrap()
        .with_base_url(server.uri())
        .with_model(ModelName::new("claude-test").unwrap())
}

fn gemini(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new("test-key")
        .unwrap()
        .with_base_url(server.uri())
        .with_model(ModelName::new("gemini-test").unwrap())
}

// ---------------------------------------------------------------------------
// Anthropic
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anthropic_sends_messages_request_and_joins_text_blocks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-test",
            "max_tokens": 256,
            "system": "Reply with JSON.",
            "messages": [{ "role": "user", "content": "Write a haiku" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [
                { "type": "text", "text": "{\"summary\":" },
                { "type": "text", "text": "\"ok\"}" }
            ],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 12, "output_tokens": 5 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = anthropic(&server)
        .complete(json_request("Write a haiku"))
        .await
        .unwrap();

    assert_eq!(response.text, r#"{"summary":"ok"}"#);
    assert_eq!(response.input_tokens.as_u64(), 12);
    assert_eq!(response.output_tokens.as_u64(), 5);
    assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
}

#[tokio::test]
async fn anthropic_unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
        .mount(&server)
        .await;

    let err = anthropic(&server)
        .complete(json_request("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Authentication { .. }));
}

#[tokio::test]
async fn anthropic_server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = anthropic(&server)
        .complete(json_request("hi"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LlmError::Api {
            status: 529,
            body: "overloaded".to_string()
        }
    );
}

#[tokio::test]
async fn anthropic_undecodable_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = anthropic(&server)
        .complete(json_request("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse { .. }));
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let server = MockServer::start().await;
    let provider = anthropic(&server);
    drop(server);

    let err = provider.complete(json_request("hi")).await.unwrap_err();

    assert!(matches!(err, LlmError::Unreachable { .. }));
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gemini_requests_json_output_and_reads_first_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "systemInstruction": { "parts": [{ "text": "Reply with JSON." }] },
            "contents": [{ "role": "user", "parts": [{ "text": "Write a haiku" }] }],
            "generationConfig": {
                "maxOutputTokens": 256,
                "responseMimeType": "application/json"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {
                    "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
                    "finishReason": "STOP"
                },
                {
                    "content": { "role": "model", "parts": [{ "text": "ignored" }] },
                    "finishReason": "STOP"
                }
            ],
            "usageMetadata": { "promptTokenCount": 20, "candidatesTokenCount": 4, "totalTokenCount": 24 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = gemini(&server)
        .complete(json_request("Write a haiku"))
        .await
        .unwrap();

    assert_eq!(response.text, r#"{"a":1}"#);
    assert_eq!(response.input_tokens.as_u64(), 20);
    assert_eq!(response.output_tokens.as_u64(), 4);
    assert_eq!(response.stop_reason.as_deref(), Some("STOP"));
}

#[tokio::test]
async fn gemini_without_candidates_returns_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let response = gemini(&server).complete(json_request("hi")).await.unwrap();

    assert!(response.text.is_empty());
    assert!(response.input_tokens.is_zero());
}

#[tokio::test]
async fn gemini_forbidden_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = gemini(&server).complete(json_request("hi")).await.unwrap_err();

    assert!(matches!(err, LlmError::Authentication { .. }));
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn build_provider_applies_model_and_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-custom:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = build_provider(&ProviderConfig {
        kind: ProviderKind::Gemini,
        api_key: "test-key".to_string(),
        model: ModelName::new("gemini-custom"),
        base_url: Some(format!("{}/", server.uri())),
    })
    .unwrap();

    assert_eq!(provider.name(), "gemini");
    assert_eq!(provider.model().as_str(), "gemini-custom");
    let response = provider.complete(json_request("hi")).await.unwrap();
    assert_eq!(response.text, "{}");
}

#[test]
fn build_provider_rejects_blank_key() {
    let result = build_provider(&ProviderConfig {
        kind: ProviderKind::Anthropic,
        api_key: String::new(),
        model: None,
        base_url: None,
    });
    assert!(matches!(result, Err(LlmError::Configuration { .. })));
}
