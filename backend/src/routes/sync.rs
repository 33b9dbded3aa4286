//! Data sync route
//!
//! Accepts any JSON object and acknowledges it. Nothing is persisted yet;
//! the endpoint reserves the contract for device sync.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use chrono::Utc;
use fitness_tracker_shared::types::SyncResponse;
use serde_json::Value;
use tracing::info;

/// Create sync routes
pub fn sync_routes() -> Router<AppState> {
    Router::new().route("/api/sync/data", post(sync_data))
}

/// POST /api/sync/data
async fn sync_data(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Json<SyncResponse>> {
    let invalid = || ApiError::BadRequest("Invalid sync data".to_string());

    let Json(body) = payload.map_err(|_| invalid())?;
    let fields = body.as_object().ok_or_else(invalid)?;
    info!(fields = fields.len(), "Sync payload received");

    Ok(Json(SyncResponse {
        success: true,
        message: "Data synced successfully".to_string(),
        timestamp: Utc::now(),
    }))
}
