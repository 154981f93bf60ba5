//! API request handlers.

/// Health check handler.
pub mod health;
/// Fused report generation handler.
pub mod report;
