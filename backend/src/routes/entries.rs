//! Shared handling for the append-only entry collections

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, Json};
use fitness_tracker_shared::{types::SuccessResponse, Collection};
use serde_json::Value;
use tracing::info;

/// Client-facing messages for one collection's endpoints
pub struct Messages {
    pub fetch_failed: &'static str,
    pub save_failed: &'static str,
}

/// Accept only well-formed JSON objects as entries
pub fn require_object(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    let Json(body) = payload?;
    if !body.is_object() {
        return Err(ApiError::BadRequest("Entry must be a JSON object".to_string()));
    }
    Ok(body)
}

/// Return the whole collection in insertion order
pub async fn list(
    state: &AppState,
    collection: Collection,
    messages: &Messages,
) -> ApiResult<Json<Vec<Value>>> {
    let entries = state
        .collections()
        .load(collection)
        .await
        .map_err(ApiError::storage(messages.fetch_failed))?;

    Ok(Json(entries))
}

/// Append the entry verbatim
pub async fn append(
    state: &AppState,
    collection: Collection,
    entry: Value,
    messages: &Messages,
) -> ApiResult<Json<SuccessResponse>> {
    let len = state
        .collections()
        .append(collection, entry)
        .await
        .map_err(ApiError::storage(messages.save_failed))?;

    info!(collection = %collection, len, "Entry recorded");
    Ok(Json(SuccessResponse::ok()))
}

/// Render an entry field for human-readable notes
pub fn field_text(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}
