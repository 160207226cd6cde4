// src/workouts/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Storage Rows
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct WorkoutPlanRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A plan entry joined with its catalog exercise
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PlanExercise {
    pub id: String,
    #[serde(skip_serializing)]
    pub workout_plan_id: String,
    pub exercise_id: String,
    pub name: String,
    pub description: String,
    pub position: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: Option<f64>,
}

// ============================================================================
// Response Schema
// ============================================================================

/// Wire representation of a plan. The owner is implied by the caller and not echoed.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutPlan {
    pub id: String,
    pub title: String,
    pub description: String,
    pub exercises: Vec<PlanExercise>,
    pub created_at: String,
    pub updated_at: String,
}

impl WorkoutPlan {
    pub fn from_parts(row: WorkoutPlanRow, exercises: Vec<PlanExercise>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            exercises,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ============================================================================
// Request Models
// ============================================================================

/// One exercise entry of a plan write, resolved against the catalog by name
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseSpec {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sets: i64,
    #[serde(default)]
    pub reps: i64,
    pub weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseSpec>,
}

/// Partial update; `exercises`, when present, replaces the plan's entries
#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub exercises: Option<Vec<ExerciseSpec>>,
}
