//! Data models for the Fitness Tracker application
//!
//! Entries are stored verbatim as the client sent them. The typed views
//! below read the handful of fields the stats need and keep everything
//! else in `extra`, so a malformed field never poisons a whole collection.

use crate::errors::{CollectionError, EntryError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The three tracked collections, each persisted as one JSON array file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    WeightLog,
    Workouts,
    Meals,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::WeightLog, Collection::Workouts, Collection::Meals];

    /// Name used in routes and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::WeightLog => "weight-log",
            Collection::Workouts => "workouts",
            Collection::Meals => "meals",
        }
    }

    /// File name inside the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::WeightLog => "weight-log.json",
            Collection::Workouts => "workouts.json",
            Collection::Meals => "meals.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight-log" => Ok(Collection::WeightLog),
            "workouts" => Ok(Collection::Workouts),
            "meals" => Ok(Collection::Meals),
            other => Err(CollectionError::Unknown(other.to_string())),
        }
    }
}

/// Weight log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Workout entry. Only the calendar date matters to the stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Meal entry. Absent calories count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MealEntry {
    pub fn calories_or_zero(&self) -> f64 {
        self.calories.unwrap_or(0.0)
    }
}

macro_rules! impl_from_value {
    ($($entry:ty),*) => {
        $(
            impl $entry {
                /// Read a stored JSON value through this view
                pub fn from_value(value: &Value) -> Result<Self, EntryError> {
                    if !value.is_object() {
                        return Err(EntryError::NotAnObject);
                    }
                    Ok(serde_json::from_value(value.clone())?)
                }

                /// Read a whole stored collection. Values that are not objects
                /// read as empty entries so the collection keeps its length.
                pub fn from_values(values: &[Value]) -> Vec<Self> {
                    values
                        .iter()
                        .map(|v| Self::from_value(v).unwrap_or_default())
                        .collect()
                }
            }
        )*
    };
}

impl_from_value!(WeightEntry, WorkoutEntry, MealEntry);

/// Accept any JSON value, keeping it only when it is a string
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accept any JSON value, keeping finite numbers and numeric strings
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}
