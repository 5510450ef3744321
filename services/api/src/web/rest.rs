//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::ChartsPayload;
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use feedback_core::{aggregate, AggregateStats};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        dashboard_handler,
    ),
    components(
        schemas(DashboardResponse)
    ),
    tags(
        (name = "Feedback Dashboard API", description = "API endpoints for the real-time feedback dashboard.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The current dashboard data: aggregate stats plus the two chart payloads.
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(value_type = Object)]
    stats: AggregateStats,
    #[schema(value_type = Object)]
    charts: ChartsPayload,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Returns the aggregate stats and chart payloads over all feedback so far.
///
/// This is the same data every WebSocket subscriber receives with each
/// `update_charts` broadcast, for clients that only poll.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Current stats and charts", body = DashboardResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn dashboard_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let records = app_state.store.list_all().await.map_err(|e| {
        error!("Failed to load feedback records: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load feedback".to_string(),
        )
    })?;

    let stats = aggregate(&records);
    let charts = ChartsPayload::from(app_state.charts.build_charts(&records));

    Ok(Json(DashboardResponse { stats, charts }))
}
