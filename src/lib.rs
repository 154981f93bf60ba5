//! # trendfuse
//!
//! A multi-model trend research server. One request fans a research prompt
//! out to three LLM providers (OpenAI, Perplexity, Gemini) in parallel, has
//! each provider critique the others' answers, then asks a fixed referee to
//! fuse everything into a single summary with per-provider citations.
//!
//! trendfuse can be used in two ways:
//!
//! 1. **As a standalone server** - run the `trendfuse-server` binary
//! 2. **As a library** - drive [`ReportOrchestrator`] directly
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use trendfuse::{Config, DetailLevel, ReportOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let orchestrator = ReportOrchestrator::from_config(&config)?;
//!
//!     let report = orchestrator.run("electric vehicles", DetailLevel::High).await?;
//!     println!("{}", report.summary.text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Degradation contract
//!
//! Any single provider call that fails - network error, non-2xx status,
//! unparseable envelope - is replaced by a placeholder marked with
//! `degraded: true` in the response, and the rest of the pipeline keeps
//! going. The whole request only fails on invalid input.
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`llm`] - provider clients and the [`llm::ProviderClient`] trait
//! - [`report`] - prompt templates and the three-stage pipeline
//! - [`types`] - request/response types and error handling
//! - [`utils`] - configuration loading

#![warn(missing_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// LLM provider clients and abstractions.
pub mod llm;
/// The generation / critique / fusion pipeline.
pub mod report;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{CallParams, ProviderClient};
pub use report::ReportOrchestrator;
pub use types::{
    AppError, CritiqueEntry, DetailLevel, FusedReport, ModelOutput, ProviderId, ReportRequest,
    Result,
};
pub use utils::config::{Config, TuningConfig};

use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The report pipeline driver.
    pub orchestrator: Arc<ReportOrchestrator>,
}
