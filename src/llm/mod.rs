//! Provider Clients
//!
//! One client per external text-generation provider, all behind the
//! [`ProviderClient`] trait so the report pipeline can fan out over them
//! without knowing which wire format each one speaks.
//!
//! Each provider has its own response envelope and its own explicit parser:
//!
//! - OpenAI and Perplexity return an array of choices with a message body
//! - Gemini returns candidates nested as content/parts
//!
//! A parser never probes fields ad hoc; missing fields, empty candidate
//! arrays, non-2xx statuses, and network failures all surface as
//! `AppError::Provider`, which the calling stage converts into a placeholder
//! so one bad call never sinks the rest of the request.

/// Core provider trait and per-call sampling parameters.
pub mod client;
/// Gemini generateContent client.
pub mod gemini;
/// OpenAI chat-completions client.
pub mod openai;
/// Perplexity chat-completions client.
pub mod perplexity;

pub use client::{CallParams, ProviderClient};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use perplexity::PerplexityClient;
