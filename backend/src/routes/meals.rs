//! Meal API routes

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
    fetch_failed: "Failed to fetch meals",
    save_failed: "Failed to save meal",
};

/// Create meal routes
pub fn meal_routes() -> Router<AppState> {
    Router::new().route("/api/meals", get(get_meals).post(log_meal))
}

/// GET /api/meals
async fn get_meals(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    entries::list(&state, Collection::Meals, &MESSAGES).await
}

/// POST /api/meals - `calories` is optional and counts as 0 when absent
async fn log_meal(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let entry = entries::require_object(payload)?;
    entries::append(&state, Collection::Meals, entry, &MESSAGES).await
}
