// src/logs/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::ApiError;

/// One exercise as it was performed, frozen at logging time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedExercise {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sets: i64,
    #[serde(default)]
    pub reps: i64,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Log row joined with the title of the plan it was logged against
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutLogRow {
    pub id: String,
    pub workout_plan_id: String,
    pub workout_plan_title: String,
    pub date: String,
    pub duration: i64,
    pub notes: String,
    pub exercises: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutLog {
    pub id: String,
    pub workout_plan_id: String,
    pub workout_plan_title: String,
    pub date: String,
    pub duration: i64,
    pub notes: String,
    pub exercises: Vec<LoggedExercise>,
    pub created_at: String,
}

impl TryFrom<WorkoutLogRow> for WorkoutLog {
    type Error = ApiError;

    fn try_from(row: WorkoutLogRow) -> Result<Self, Self::Error> {
        let exercises: Vec<LoggedExercise> =
            serde_json::from_str(&row.exercises).map_err(|e| {
                ApiError::InternalServer(format!(
                    "Corrupt exercise snapshot on log {}: {}",
                    row.id, e
                ))
            })?;

        Ok(Self {
            id: row.id,
            workout_plan_id: row.workout_plan_id,
            workout_plan_title: row.workout_plan_title,
            date: row.date,
            duration: row.duration,
            notes: row.notes,
            exercises,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    #[serde(default)]
    pub workout_plan_id: String,
    #[serde(default)]
    pub date: String,
    pub duration: Option<i64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exercises: Vec<LoggedExercise>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLogRequest {
    pub workout_plan_id: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i64>,
    pub notes: Option<String>,
    pub exercises: Option<Vec<LoggedExercise>>,
}
