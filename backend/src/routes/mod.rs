//! Route definitions for the Fitness Tracker API
//!
//! This module organizes all API routes and applies middleware.
//! Health checks are public; everything else sits behind the auth layer.

use crate::auth::auth_middleware;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

mod entries;
mod health;
mod meals;
mod stats;
mod sync;
mod weight;
mod workouts;


pub use meals::meal_routes;
pub use stats::stats_routes;
pub use sync::sync_routes;
pub use weight::weight_routes;
pub use workouts::workout_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .merge(api_routes(state.clone()))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Authenticated API routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(weight_routes())
        .merge(workout_routes())
        .merge(meal_routes())
        .merge(stats_routes())
        .merge(sync_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
