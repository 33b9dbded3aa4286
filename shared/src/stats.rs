//! Dashboard stats aggregation
//!
//! Derives the summary shown on the dashboard from the three collections
//! and a single reference instant. Everything here is a pure function of
//! its inputs: the same collections and the same `now` always give the
//! same summary.
//!
//! "Today" and the start of the week window are taken from `now` in the
//! offset it carries. Callers pick that offset explicitly (UTC by default)
//! so results never depend on the host locale.

use crate::models::{MealEntry, WeightEntry, WorkoutEntry};
use chrono::{DateTime, Days, Duration, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Longest streak the backward walk can report
pub const STREAK_WINDOW_DAYS: u64 = 365;

/// Length of the rolling workout window
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Calendar date format shared by every entry
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dashboard summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub current_weight: f64,
    pub workouts_this_week: usize,
    pub streak: u32,
    pub calories_today: f64,
    pub total_workouts: usize,
    pub total_weight_logs: usize,
}

/// Compute the dashboard summary for the reference instant `now`
pub fn compute_stats(
    weights: &[WeightEntry],
    workouts: &[WorkoutEntry],
    meals: &[MealEntry],
    now: DateTime<FixedOffset>,
) -> StatsSummary {
    let today = now.date_naive();

    StatsSummary {
        current_weight: current_weight(weights),
        workouts_this_week: workouts_since(workouts, now - Duration::days(WEEK_WINDOW_DAYS)),
        streak: workout_streak(workouts, today),
        calories_today: calories_on(meals, today),
        total_workouts: workouts.len(),
        total_weight_logs: weights.len(),
    }
}

/// Weight of the last appended entry, or 0 when there is none.
///
/// Insertion order is authoritative; entry dates are not consulted.
pub fn current_weight(weights: &[WeightEntry]) -> f64 {
    weights.last().and_then(|w| w.weight).unwrap_or(0.0)
}

/// Count workouts whose date-instant is at or after `window_start`
pub fn workouts_since(workouts: &[WorkoutEntry], window_start: DateTime<FixedOffset>) -> usize {
    let offset = window_start.timezone();
    workouts
        .iter()
        .filter_map(|w| w.date.as_deref())
        .filter_map(|date| date_instant(date, &offset))
        .filter(|instant| *instant >= window_start)
        .count()
}

/// Consecutive days with a workout, walking back from `today`.
///
/// A missing workout today does not break the streak: the walk moves on to
/// yesterday. Any later gap ends it.
pub fn workout_streak(workouts: &[WorkoutEntry], today: NaiveDate) -> u32 {
    let workout_dates: HashSet<&str> = workouts.iter().filter_map(|w| w.date.as_deref()).collect();

    let mut streak = 0;
    for i in 0..STREAK_WINDOW_DAYS {
        let Some(check_date) = today.checked_sub_days(Days::new(i)) else {
            break;
        };
        let date_str = check_date.format(DATE_FORMAT).to_string();

        if workout_dates.contains(date_str.as_str()) {
            streak += 1;
        } else if i > 0 {
            break;
        }
    }
    streak
}

/// Sum of calories over meals dated exactly `day`
pub fn calories_on(meals: &[MealEntry], day: NaiveDate) -> f64 {
    let day_str = day.format(DATE_FORMAT).to_string();
    meals
        .iter()
        .filter(|m| m.date.as_deref() == Some(day_str.as_str()))
        .fold(0.0, |total, meal| total + meal.calories_or_zero())
}

/// Instant an entry date refers to.
///
/// Plain `YYYY-MM-DD` dates mean midnight in `offset`; full RFC 3339
/// timestamps keep their own instant.
fn date_instant(date: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(day) = NaiveDate::parse_from_str(date, DATE_FORMAT) {
        let midnight = day.and_hms_opt(0, 0, 0)?;
        return offset.from_local_datetime(&midnight).single();
    }
    DateTime::parse_from_rfc3339(date).ok()
}
