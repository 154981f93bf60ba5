use crate::{
    types::{FusedReport, ReportRequest, Result},
    AppState,
};
use axum::{extract::State, Json};

/// Generate a fused trend report for a topic.
#[utoipa::path(
    post,
    path = "/api/generate-fused",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Composite report assembled", body = FusedReport),
        (status = 400, description = "Invalid topic"),
        (status = 500, description = "Unexpected pipeline failure")
    ),
    tag = "report"
)]
pub async fn generate_fused(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<FusedReport>> {
    let detail_level = payload.detail_level.unwrap_or_default();

    let report = state
        .orchestrator
        .run(&payload.topic, detail_level)
        .await?;

    Ok(Json(report))
}
