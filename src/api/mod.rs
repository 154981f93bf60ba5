//! HTTP API Handlers and Routes
//!
//! The REST surface of trendfuse, built on the Axum web framework.
//!
//! # Endpoints
//!
//! - `POST /api/generate-fused` - run the full report pipeline for a topic
//! - `GET /api/health` - health check
//!
//! A request either returns a full composite report (possibly containing
//! degraded placeholder segments) or a single `{"error": ...}` body for
//! total failure - callers always receive something interpretable.

/// Request and response handlers.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
