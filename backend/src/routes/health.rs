//! Health check endpoints
//!
//! - /health, /api/health - Liveness, fixed payload, no auth
//! - /health/ready - Readiness probe (checks the data directory)

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

const APP_NAME: &str = "fitness-tracker";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub storage: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn new(status: &str, checks: Option<HealthChecks>) -> Self {
        Self {
            status: status.to_string(),
            app: APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            checks,
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("ok", None))
}

/// Readiness probe - the data directory must exist and be writable
/// Returns 503 if it is not
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = if state.collections().is_writable().await {
        CheckStatus {
            status: "healthy".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "unhealthy".to_string(),
            message: Some(format!(
                "data directory {} is missing or not writable",
                state.collections().data_dir().display()
            )),
        }
    };

    let is_healthy = storage.status == "healthy";
    let response = HealthResponse::new(
        if is_healthy { "ready" } else { "not_ready" },
        Some(HealthChecks { storage }),
    );

    if is_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
