//! Report Pipeline
//!
//! The control flow behind one trend report:
//!
//! 1. **Generation** - all providers answer the research prompt in parallel
//! 2. **Cross-validation** - every provider's answer is critiqued by each of
//!    the other providers (n * (n - 1) calls, also in parallel)
//! 3. **Fusion** - a fixed referee merges everything into one summary with
//!    bracketed per-provider citations
//!
//! Every stage joins all its calls and tolerates individual failures: a
//! failed call becomes a placeholder [`crate::types::ModelOutput`] and the
//! rest of the pipeline keeps going. Only invalid input fails the request.

/// Cross-validation stage.
pub mod critique;
/// Referee synthesis stage.
pub mod fusion;
/// Research, critique, and fusion prompt templates.
pub mod prompt;

mod orchestrator;

pub use orchestrator::ReportOrchestrator;
