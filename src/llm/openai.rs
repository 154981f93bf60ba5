use crate::llm::client::{CallParams, ProviderClient};
use crate::types::{AppError, ProviderId, Result};
use crate::utils::config::ProviderConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the OpenAI chat-completions endpoint. Also acts as the fixed
/// referee for the fusion stage.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    /// Build a client from provider settings and the shared call timeout.
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build OpenAI HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/v1/chat/completions", config.base_url.trim_end_matches('/')),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Pull the generated text out of the choices array. Empty choices or a
/// missing message body is an error, not a panic.
fn extract_text(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::Provider("OpenAI returned no message content".to_string()))
}

#[async_trait]
impl ProviderClient for OpenAiClient {
    async fn generate(&self, system: &str, prompt: &str, params: &CallParams) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Provider(format!(
                "OpenAI returned status {status}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("OpenAI response unparseable: {e}")))?;

        extract_text(body)
    }

    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_reads_first_choice() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "  trend analysis  "}}]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "trend analysis");
    }

    #[test]
    fn extract_text_rejects_empty_choices() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": []
        }))
        .unwrap();
        assert!(extract_text(response).is_err());
    }

    #[test]
    fn extract_text_rejects_missing_content() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {}}]
        }))
        .unwrap();
        assert!(extract_text(response).is_err());

        // Alternate shape: no choices field at all.
        let response: ChatResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(extract_text(response).is_err());
    }
}
