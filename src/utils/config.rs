use crate::types::{AppError, ProviderId, Result};
use std::env;
use std::time::Duration;

/// Full process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Provider credentials and endpoints.
    pub providers: ProvidersConfig,
    /// Sampling temperatures and token budgets per call role.
    pub tuning: TuningConfig,
}

/// HTTP server bind and CORS settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Allowed CORS origins. Empty means allow any origin.
    pub cors_origins: Vec<String>,
}

/// Credentials and endpoint settings for all three providers.
///
/// A missing credential is a configuration error caught here, at startup,
/// rather than surfacing as a failed call on every request.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    /// OpenAI credentials and endpoint.
    pub openai: ProviderConfig,
    /// Perplexity credentials and endpoint.
    pub perplexity: ProviderConfig,
    /// Gemini credentials and endpoint.
    pub gemini: ProviderConfig,
    /// Per-call network timeout applied to every outbound provider request.
    pub timeout: Duration,
}

/// Settings for one provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer credential (query credential for Gemini).
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Endpoint base URL; overridable for tests and proxies.
    pub base_url: String,
}

/// Sampling temperatures and output-token budgets per call role.
///
/// Critique and fusion run cooler than generation so the later stages favor
/// grounding over creativity. The defaults keep that ordering; overrides that
/// break it are rejected at load time.
#[derive(Debug, Clone)]
pub struct TuningConfig {
    /// Sampling temperature for first-pass generation.
    pub generation_temperature: f32,
    /// Sampling temperature for critique calls.
    pub critique_temperature: f32,
    /// Sampling temperature for the fusion call.
    pub fusion_temperature: f32,
    /// Output-token budget for generation.
    pub generation_max_tokens: u32,
    /// Output-token budget for critiques.
    pub critique_max_tokens: u32,
    /// Output-token budget for fusion.
    pub fusion_max_tokens: u32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            generation_temperature: 0.5,
            critique_temperature: 0.4,
            fusion_temperature: 0.3,
            generation_max_tokens: 1200,
            critique_max_tokens: 700,
            fusion_max_tokens: 1500,
        }
    }
}

impl ProvidersConfig {
    /// Settings for one provider by id.
    pub fn get(&self, id: ProviderId) -> &ProviderConfig {
        match id {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Perplexity => &self.perplexity,
            ProviderId::Gemini => &self.gemini,
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env` if
    /// present). Missing provider credentials fail here, at startup.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 5000)?,
            cors_origins: env::var("TRENDFUSE_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        let providers = ProvidersConfig {
            openai: ProviderConfig {
                api_key: required_key("OPENAI_API_KEY")?,
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
                base_url: env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            },
            perplexity: ProviderConfig {
                api_key: required_key("PERPLEXITY_API_KEY")?,
                model: env::var("PERPLEXITY_MODEL").unwrap_or_else(|_| "sonar-pro".to_string()),
                base_url: env::var("PERPLEXITY_BASE_URL")
                    .unwrap_or_else(|_| "https://api.perplexity.ai".to_string()),
            },
            gemini: ProviderConfig {
                api_key: required_key("GEMINI_API_KEY")?,
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
                base_url: env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            },
            timeout: Duration::from_secs(parse_var("PROVIDER_TIMEOUT_SECS", 60)?),
        };

        let defaults = TuningConfig::default();
        let tuning = TuningConfig {
            generation_temperature: parse_var(
                "GENERATION_TEMPERATURE",
                defaults.generation_temperature,
            )?,
            critique_temperature: parse_var("CRITIQUE_TEMPERATURE", defaults.critique_temperature)?,
            fusion_temperature: parse_var("FUSION_TEMPERATURE", defaults.fusion_temperature)?,
            generation_max_tokens: parse_var(
                "GENERATION_MAX_TOKENS",
                defaults.generation_max_tokens,
            )?,
            critique_max_tokens: parse_var("CRITIQUE_MAX_TOKENS", defaults.critique_max_tokens)?,
            fusion_max_tokens: parse_var("FUSION_MAX_TOKENS", defaults.fusion_max_tokens)?,
        };

        if tuning.critique_temperature > tuning.generation_temperature
            || tuning.fusion_temperature > tuning.generation_temperature
        {
            return Err(AppError::Config(
                "critique/fusion temperature must not exceed generation temperature".to_string(),
            ));
        }

        Ok(Config {
            server,
            providers,
            tuning,
        })
    }
}

fn required_key(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Config(format!(
            "missing required environment variable {name}"
        ))),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|_| AppError::Config(format!("could not parse {name}={v}"))),
        Err(_) => Ok(default),
    }
}
