//! Dashboard stats service
//!
//! Loads all three collections fresh on every call and hands them to the
//! shared aggregator. There is no cache to invalidate.

use crate::repositories::{CollectionRepository, StoreError};
use chrono::{DateTime, FixedOffset};
use fitness_tracker_shared::{compute_stats, Collection, MealEntry, StatsSummary, WeightEntry, WorkoutEntry};
use tracing::debug;

/// Stats service for business logic
pub struct StatsService;

impl StatsService {
    /// Compute the dashboard summary as of `now`.
    ///
    /// Fails as a whole if any collection fails to load.
    pub async fn dashboard(
        collections: &CollectionRepository,
        now: DateTime<FixedOffset>,
    ) -> Result<StatsSummary, StoreError> {
        let (weights, workouts, meals) = tokio::try_join!(
            collections.load(Collection::WeightLog),
            collections.load(Collection::Workouts),
            collections.load(Collection::Meals),
        )?;

        let stats = compute_stats(
            &WeightEntry::from_values(&weights),
            &WorkoutEntry::from_values(&workouts),
            &MealEntry::from_values(&meals),
            now,
        );

        debug!(
            streak = stats.streak,
            workouts_this_week = stats.workouts_this_week,
            "Stats computed"
        );
        Ok(stats)
    }
}
