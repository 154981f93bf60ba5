//! Configuration utilities.

/// Environment-driven configuration loading.
pub mod config;
