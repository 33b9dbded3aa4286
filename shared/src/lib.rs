//! Fitness Tracker Shared Library
//!
//! This crate contains the entry models, collection kinds and the stats
//! aggregation used by the backend and the WASM dashboard module.

pub mod errors;
pub mod models;
pub mod stats;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use models::{Collection, MealEntry, WeightEntry, WorkoutEntry};
pub use stats::{compute_stats, StatsSummary, STREAK_WINDOW_DAYS};
pub use types::*;
