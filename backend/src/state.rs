//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Nothing mutable is cached here: every request re-reads the collections
//! from disk. All fields are cheap to clone.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::CollectionRepository;
use crate::services::ActivityJournal;
use chrono::FixedOffset;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Collection files under the data directory
    pub collections: CollectionRepository,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Best-effort activity notes
    pub journal: ActivityJournal,
}

impl AppState {
    /// Create a new application state
    ///
    /// JWT keys are derived here, so call this once at startup.
    pub fn new(config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);
        let collections = CollectionRepository::new(config.storage.data_dir.clone());
        let journal = ActivityJournal::from_config(&config.journal, config.stats.offset());

        Self {
            collections,
            config: Arc::new(config),
            jwt,
            journal,
        }
    }

    #[inline]
    pub fn collections(&self) -> &CollectionRepository {
        &self.collections
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn journal(&self) -> &ActivityJournal {
        &self.journal
    }

    /// Offset used to decide what "today" is
    #[inline]
    pub fn utc_offset(&self) -> FixedOffset {
        self.config.stats.offset()
    }
}
