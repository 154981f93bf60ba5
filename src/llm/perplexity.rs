use crate::llm::client::{CallParams, ProviderClient};
use crate::types::{AppError, ProviderId, Result};
use crate::utils::config::ProviderConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the Perplexity chat-completions endpoint.
///
/// The envelope is OpenAI-shaped but carries extra fields (citations,
/// search results) that this pipeline ignores.
pub struct PerplexityClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl PerplexityClient {
    /// Build a client from provider settings and the shared call timeout.
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::Config(format!("failed to build Perplexity HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
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
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn extract_text(response: ChatResponse) -> Result<String> {
    // Citations are returned but not folded into the text; the fusion stage
    // attributes facts by provider, not by upstream URL.
    let _ = response.citations;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::Provider("Perplexity returned no message content".to_string()))
}

#[async_trait]
impl ProviderClient for PerplexityClient {
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
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Perplexity request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Provider(format!(
                "Perplexity returned status {status}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Perplexity response unparseable: {e}")))?;

        extract_text(body)
    }

    fn id(&self) -> ProviderId {
        ProviderId::Perplexity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_ignores_citations() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "sonar output"}}],
            "citations": ["https://example.com/a", "https://example.com/b"]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "sonar output");
    }

    #[test]
    fn extract_text_rejects_blank_content() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "   "}}]
        }))
        .unwrap();
        assert!(extract_text(response).is_err());
    }
}
