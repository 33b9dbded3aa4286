//! Fitness Tracker WASM Module
//!
//! Exposes the dashboard stats to the browser so the dashboard can
//! recompute them from collections it already holds.

use chrono::DateTime;
use fitness_tracker_shared::{compute_stats, MealEntry, WeightEntry, WorkoutEntry};
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Compute the dashboard stats from the three collections as JSON arrays.
///
/// `now` is an RFC 3339 timestamp; its offset decides what "today" is.
/// Returns the stats summary as a JSON string.
#[wasm_bindgen]
pub fn dashboard_stats(weights: &str, workouts: &str, meals: &str, now: &str) -> Result<String, JsValue> {
    let now = DateTime::parse_from_rfc3339(now).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let weights = WeightEntry::from_values(&parse_collection(weights)?);
    let workouts = WorkoutEntry::from_values(&parse_collection(workouts)?);
    let meals = MealEntry::from_values(&parse_collection(meals)?);

    let stats = compute_stats(&weights, &workouts, &meals, now);
    serde_json::to_string(&stats).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_collection(json: &str) -> Result<Vec<Value>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))
}
