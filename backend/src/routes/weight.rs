//! Weight log API routes

use super::entries::{self, Messages};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Extension, Json, Router,
};
use fitness_tracker_shared::{types::SuccessResponse, Collection};
use serde_json::Value;
use tracing::debug;

const MESSAGES: Messages = Messages {
    fetch_failed: "Failed to fetch weight log",
    save_failed: "Failed to save weight log",
};

/// Create weight log routes
pub fn weight_routes() -> Router<AppState> {
    Router::new().route("/api/weight-log", get(get_weight_log).post(log_weight))
}

/// GET /api/weight-log - Every weight entry in the order it was logged
async fn get_weight_log(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    entries::list(&state, Collection::WeightLog, &MESSAGES).await
}

/// POST /api/weight-log - Log a weight entry
///
/// The body is stored as sent. After a successful write the event is noted
/// in the activity journal; journal failures do not affect the response.
async fn log_weight(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let entry = entries::require_object(payload)?;
    let note = format!(
        "Weight logged: {}kg on {}",
        entries::field_text(&entry, "weight"),
        entries::field_text(&entry, "date")
    );
    debug!(subject = %user.subject, "Logging weight");

    let response = entries::append(&state, Collection::WeightLog, entry, &MESSAGES).await?;
    state.journal().record(&note).await;

    Ok(response)
}
