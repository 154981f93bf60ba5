//! Provider client tests against a local mock HTTP server.
//!
//! Each provider's envelope parsing, auth style, and failure behavior is
//! exercised over the wire, with the client base URL pointed at wiremock.

use std::time::Duration;
use trendfuse::utils::config::ProviderConfig;
use trendfuse::{CallParams, ProviderClient};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_config(base_url: String) -> ProviderConfig {
    ProviderConfig {
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        base_url,
    }
}

fn call_params() -> CallParams {
    CallParams {
        temperature: 0.5,
        max_tokens: 1200,
    }
}

const TIMEOUT: Duration = Duration::from_secs(5);

// ============= OpenAI =============

#[tokio::test]
async fn openai_sends_bearer_auth_and_parses_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "temperature": 0.5,
            "max_tokens": 1200
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "trend report"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        trendfuse::llm::OpenAiClient::new(&provider_config(server.uri()), TIMEOUT).unwrap();
    let text = client
        .generate("system prompt", "user prompt", &call_params())
        .await
        .unwrap();
    assert_eq!(text, "trend report");
}

#[tokio::test]
async fn openai_non_2xx_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client =
        trendfuse::llm::OpenAiClient::new(&provider_config(server.uri()), TIMEOUT).unwrap();
    let result = client
        .generate("system", "prompt", &call_params())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn openai_empty_choices_is_an_error_not_a_panic() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
        )
        .mount(&server)
        .await;

    let client =
        trendfuse::llm::OpenAiClient::new(&provider_config(server.uri()), TIMEOUT).unwrap();
    assert!(client
        .generate("system", "prompt", &call_params())
        .await
        .is_err());
}

#[tokio::test]
async fn openai_slow_response_hits_the_call_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"choices": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = trendfuse::llm::OpenAiClient::new(
        &provider_config(server.uri()),
        Duration::from_millis(50),
    )
    .unwrap();
    assert!(client
        .generate("system", "prompt", &call_params())
        .await
        .is_err());
}

// ============= Perplexity =============

#[tokio::test]
async fn perplexity_parses_choices_and_ignores_citations() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "sonar findings"}}],
            "citations": ["https://example.com/source"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        trendfuse::llm::PerplexityClient::new(&provider_config(server.uri()), TIMEOUT).unwrap();
    let text = client
        .generate("system", "prompt", &call_params())
        .await
        .unwrap();
    assert_eq!(text, "sonar findings");
}

#[tokio::test]
async fn perplexity_unparseable_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client =
        trendfuse::llm::PerplexityClient::new(&provider_config(server.uri()), TIMEOUT).unwrap();
    assert!(client
        .generate("system", "prompt", &call_params())
        .await
        .is_err());
}

// ============= Gemini =============

#[tokio::test]
async fn gemini_uses_key_query_param_and_joins_parts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": {"temperature": 0.5, "maxOutputTokens": 1200}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "gemini part one"}, {"text": "part two"}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        trendfuse::llm::GeminiClient::new(&provider_config(server.uri()), TIMEOUT).unwrap();
    let text = client
        .generate("system", "prompt", &call_params())
        .await
        .unwrap();
    assert_eq!(text, "gemini part one\npart two");
}

#[tokio::test]
async fn gemini_empty_candidates_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let client =
        trendfuse::llm::GeminiClient::new(&provider_config(server.uri()), TIMEOUT).unwrap();
    assert!(client
        .generate("system", "prompt", &call_params())
        .await
        .is_err());
}
