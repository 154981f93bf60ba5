use crate::types::{ProviderId, Result};
use crate::utils::config::{ProvidersConfig, TuningConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// Sampling parameters for a single provider call.
///
/// The pipeline selects these per role: critique and fusion calls run at a
/// lower temperature than first-pass generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Output-token budget.
    pub max_tokens: u32,
}

impl CallParams {
    /// Parameters for a first-pass generation call.
    pub fn generation(tuning: &TuningConfig) -> Self {
        Self {
            temperature: tuning.generation_temperature,
            max_tokens: tuning.generation_max_tokens,
        }
    }

    /// Parameters for a critique call.
    pub fn critique(tuning: &TuningConfig) -> Self {
        Self {
            temperature: tuning.critique_temperature,
            max_tokens: tuning.critique_max_tokens,
        }
    }

    /// Parameters for the fusion call.
    pub fn fusion(tuning: &TuningConfig) -> Self {
        Self {
            temperature: tuning.fusion_temperature,
            max_tokens: tuning.fusion_max_tokens,
        }
    }
}

/// Generic provider client trait.
///
/// One outbound network call per invocation, one attempt, no retries. Errors
/// are returned, never panicked, so the pipeline can degrade per call.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn generate(&self, system: &str, prompt: &str, params: &CallParams) -> Result<String>;

    /// Which provider this client talks to.
    fn id(&self) -> ProviderId;
}

/// Build the three real clients from configuration, in fan-out order.
pub fn build_clients(providers: &ProvidersConfig) -> Result<Vec<Arc<dyn ProviderClient>>> {
    Ok(vec![
        Arc::new(super::OpenAiClient::new(
            providers.get(ProviderId::OpenAi),
            providers.timeout,
        )?),
        Arc::new(super::PerplexityClient::new(
            providers.get(ProviderId::Perplexity),
            providers.timeout,
        )?),
        Arc::new(super::GeminiClient::new(
            providers.get(ProviderId::Gemini),
            providers.timeout,
        )?),
    ])
}
