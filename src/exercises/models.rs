use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Shared catalog entry, referenced by any number of plans
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_muscle: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub target_muscle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExerciseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_muscle: Option<String>,
}
