//! Workout aggregate: the `workouts` root row and its ordered `workout_entries`.

use fitlog_core::types::{DbId, Timestamp};
use fitlog_core::workout::EntryFields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A workout with its entries, ordered by `order_index`.
///
/// `entries` is not a column; repositories fill it from `workout_entries`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workout {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(skip)]
    pub entries: Vec<WorkoutEntry>,
}

/// A row from the `workout_entries` table.
///
/// `reps`, `duration_seconds` and `weight` are nullable: `None` means the
/// value was never set, which is not the same as zero.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct WorkoutEntry {
    pub id: DbId,
    pub workout_id: DbId,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    pub notes: String,
    pub order_index: i32,
}

/// DTO for one entry inside a create or update payload.
///
/// `order_index` is optional; when absent the entry's position in the
/// submitted list is used.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkoutEntry {
    pub exercise_name: String,
    pub sets: i32,
    #[serde(default)]
    pub reps: Option<i32>,
    #[serde(default)]
    pub duration_seconds: Option<i32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub order_index: Option<i32>,
}

impl CreateWorkoutEntry {
    /// Borrowed view used by the validation rules in `fitlog_core::workout`.
    pub fn fields(&self) -> EntryFields<'_> {
        EntryFields {
            exercise_name: &self.exercise_name,
            sets: self.sets,
            reps: self.reps,
            duration_seconds: self.duration_seconds,
            weight: self.weight,
            order_index: self.order_index,
        }
    }
}

impl From<&WorkoutEntry> for CreateWorkoutEntry {
    /// Re-submit a stored entry; its id is not carried over.
    fn from(entry: &WorkoutEntry) -> Self {
        Self {
            exercise_name: entry.exercise_name.clone(),
            sets: entry.sets,
            reps: entry.reps,
            duration_seconds: entry.duration_seconds,
            weight: entry.weight,
            notes: entry.notes.clone(),
            order_index: Some(entry.order_index),
        }
    }
}

/// DTO for creating a workout with its entries. Any `user_id` in the payload
/// is ignored; the owner comes from the authenticated identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkout {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_minutes: i32,
    #[serde(default)]
    pub calories_burned: i32,
    #[serde(default)]
    pub entries: Vec<CreateWorkoutEntry>,
}

/// DTO for updating a workout.
///
/// Scalar fields are optional (`None` keeps the stored value). The entry list
/// is a full replacement; when it is absent the caller re-submits the stored
/// entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkout {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    #[serde(default, alias = "entries")]
    pub workout_entries: Option<Vec<CreateWorkoutEntry>>,
}
