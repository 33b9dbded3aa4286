//! Dashboard stats route

use crate::error::{ApiError, ApiResult};
use crate::services::StatsService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use fitness_tracker_shared::StatsSummary;

/// Create stats routes
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}

/// GET /api/stats - Dashboard summary as of now
async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsSummary>> {
    // Captured once so "today" and the week window agree
    let now = Utc::now().with_timezone(&state.utc_offset());

    let stats = StatsService::dashboard(state.collections(), now)
        .await
        .map_err(ApiError::storage("Failed to calculate stats"))?;

    Ok(Json(stats))
}
