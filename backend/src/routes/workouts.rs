//! Workout API routes

use super::entries::{self, Messages};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use fitness_tracker_shared::{types::SuccessResponse, Collection};
use serde_json::Value;

const MESSAGES: Messages = Messages {
    fetch_failed: "Failed to fetch workouts",
    save_failed: "Failed to save workout",
};

/// Create workout routes
pub fn workout_routes() -> Router<AppState> {
    Router::new().route("/api/workouts", get(get_workouts).post(log_workout))
}

/// GET /api/workouts
async fn get_workouts(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    entries::list(&state, Collection::Workouts, &MESSAGES).await
}

/// POST /api/workouts
async fn log_workout(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let entry = entries::require_object(payload)?;
    entries::append(&state, Collection::Workouts, entry, &MESSAGES).await
}
