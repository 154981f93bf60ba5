use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the API router. State and middleware layers are attached by the
/// caller.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/generate-fused",
            post(crate::api::handlers::report::generate_fused),
        )
        .route("/api/health", get(crate::api::handlers::health::health))
}
