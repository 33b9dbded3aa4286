//! Authentication middleware
//!
//! Every protected route goes through `auth_middleware`, which rejects the
//! request before any handler (and so any storage work) runs.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Authenticated caller, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
}

impl AuthUser {
    /// Authenticate a request from its headers
    pub fn from_headers(state: &AppState, headers: &HeaderMap) -> Result<Self, ApiError> {
        let auth_header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        let claims = state
            .jwt()
            .validate_access_token(token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(AuthUser { subject: claims.sub })
    }
}

/// Middleware applying authentication to a group of routes via layer
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = AuthUser::from_headers(&state, request.headers())?;
    debug!(subject = %user.subject, path = %request.uri().path(), "Request authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
