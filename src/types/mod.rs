use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Request body for `POST /api/generate-fused`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportRequest {
    /// Topic to research (trimmed; 1..=80 characters).
    pub topic: String,
    /// Detail level for the research prompt. Defaults to `high` (in-depth).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_level: Option<DetailLevel>,
}

/// The composite report returned to the caller: the fused summary plus every
/// raw generation and critique it was built from.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FusedReport {
    /// Referee-synthesized summary with bracketed provider citations.
    pub summary: ModelOutput,
    /// First-pass answer per provider, keyed by provider id.
    pub generations: BTreeMap<ProviderId, ModelOutput>,
    /// One entry per ordered (subject, critic) provider pair.
    pub critiques: Vec<CritiqueEntry>,
    /// Wall-clock time spent on the whole pipeline.
    pub duration_ms: u64,
}

impl FusedReport {
    /// Look up the critique of `subject`'s output written by `critic`.
    pub fn critique_of(&self, subject: ProviderId, critic: ProviderId) -> Option<&ModelOutput> {
        self.critiques
            .iter()
            .find(|c| c.subject == subject && c.critic == critic)
            .map(|c| &c.output)
    }
}

/// How deep the research prompt asks each provider to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Structured multi-section analysis with numbered requirements.
    #[default]
    High,
    /// Short bulleted summary.
    Low,
}

// ============= Provider Identity =============

/// Identity of one external text-generation provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// OpenAI chat-completions API. Also the fixed fusion referee.
    OpenAi,
    /// Perplexity chat-completions API.
    Perplexity,
    /// Google Gemini generateContent API.
    Gemini,
}

impl ProviderId {
    /// All providers, in the order they are fanned out.
    pub const ALL: [ProviderId; 3] = [
        ProviderId::OpenAi,
        ProviderId::Perplexity,
        ProviderId::Gemini,
    ];

    /// Human-readable label used in prompts and citations.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Perplexity => "Perplexity",
            ProviderId::Gemini => "Gemini",
        }
    }

    /// Every ordered (subject, critic) pair with subject != critic.
    /// For n providers this yields n * (n - 1) pairs.
    pub fn critique_pairs() -> impl Iterator<Item = (ProviderId, ProviderId)> {
        Self::ALL.into_iter().flat_map(|subject| {
            Self::ALL
                .into_iter()
                .filter(move |critic| *critic != subject)
                .map(move |critic| (subject, critic))
        })
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============= Pipeline Result Types =============

/// Text produced by one model call, or a placeholder standing in for a call
/// that failed. The `degraded` flag lets callers and tests distinguish the
/// two without matching on marker strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModelOutput {
    /// The generated text, or a fixed placeholder marker.
    pub text: String,
    /// True when `text` is a placeholder for a failed call.
    pub degraded: bool,
}

impl ModelOutput {
    /// Genuine model output.
    pub fn genuine(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            degraded: false,
        }
    }

    /// Fixed placeholder substituted for a failed call.
    pub fn placeholder(marker: impl Into<String>) -> Self {
        Self {
            text: marker.into(),
            degraded: true,
        }
    }
}

/// One provider's critique of another provider's generation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CritiqueEntry {
    /// Provider whose output was critiqued.
    pub subject: ProviderId,
    /// Provider that wrote the critique.
    pub critic: ProviderId,
    /// The critique text, or a placeholder scoped to this pair.
    pub output: ModelOutput,
}

// ============= Error Types =============

/// Application-level error, mapped to an HTTP status by `IntoResponse`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad or missing configuration, caught at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A provider call failed. Recovered into a placeholder at the stage
    /// boundary; only reaches the caller if it escapes a client directly.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Request validation failed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A bug surface: unexpected failure outside any provider-call boundary.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Config(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Provider(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critique_pairs_cover_all_ordered_pairs() {
        let pairs: Vec<_> = ProviderId::critique_pairs().collect();
        assert_eq!(pairs.len(), ProviderId::ALL.len() * (ProviderId::ALL.len() - 1));

        for (subject, critic) in &pairs {
            assert_ne!(subject, critic);
        }

        // No duplicates.
        for (i, a) in pairs.iter().enumerate() {
            for b in &pairs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn model_output_constructors_set_degraded_flag() {
        assert!(!ModelOutput::genuine("real text").degraded);
        assert!(ModelOutput::placeholder("(no output from Gemini)").degraded);
    }

    #[test]
    fn detail_level_deserializes_lowercase() {
        let level: DetailLevel = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(level, DetailLevel::Low);
        assert_eq!(DetailLevel::default(), DetailLevel::High);
    }

    #[test]
    fn provider_id_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProviderId::OpenAi).unwrap(),
            "\"openai\""
        );
        assert_eq!(ProviderId::Gemini.label(), "Gemini");
    }
}
