//! Common test utilities for integration tests
//!
//! Each `TestApp` gets its own temporary data directory, so tests never
//! share collection files.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fitness_tracker_backend::{config::AppConfig, routes, state::AppState};
use chrono::{Timelike, Utc};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub token: String,
    pub data_dir: PathBuf,
    pub journal_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Create a test application with the activity journal disabled
    pub async fn new() -> Self {
        Self::build(false).await
    }

    /// Create a test application that writes the activity journal
    pub async fn with_journal() -> Self {
        Self::build(true).await
    }

    async fn build(journal: bool) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = dir.path().join("data");
        let journal_dir = dir.path().join("memory");

        let mut config = test_config();
        config.storage.data_dir = data_dir.clone();
        config.journal.enabled = journal;
        config.journal.dir = Some(journal_dir.clone());

        let state = AppState::new(config);
        state
            .collections()
            .ensure_data_dir()
            .await
            .expect("Failed to create data dir");
        let token = state
            .jwt()
            .generate_access_token("test-owner")
            .expect("Failed to generate token");

        Self {
            app: routes::create_router(state),
            token,
            data_dir,
            journal_dir,
            _dir: dir,
        }
    }

    /// Make a GET request without credentials
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {}", self.token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body and no credentials
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_auth(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.token))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Authenticated GET, parsed as JSON
    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        let (status, body) = self.get_auth(path).await;
        assert_eq!(status, StatusCode::OK, "GET {} failed: {}", path, body);
        serde_json::from_str(&body).unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

/// Sleep past UTC midnight when it is close, so a test that derives dates
/// from "today" sees the same day as the handlers it calls
pub async fn settle_day() {
    const MARGIN_SECS: u32 = 30;

    let remaining = 86_400 - Utc::now().num_seconds_from_midnight();
    if remaining <= MARGIN_SECS {
        tokio::time::sleep(Duration::from_secs(u64::from(remaining) + 1)).await;
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.jwt.secret = "test-secret-key-for-testing-only-32chars".to_string();
    config.jwt.access_token_expiry_secs = 3600;
    config
}
