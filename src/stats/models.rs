// src/stats/models.rs

use serde::Serialize;
use sqlx::FromRow;

/// Logged workouts in one `%Y-%W` calendar week
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct WeeklyCount {
    pub week: String,
    pub count: i64,
}

/// Aggregates over the caller's own plans and logs. Every figure is zero, never null, for a new user.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutStats {
    pub total_workouts: i64,
    pub total_plans: i64,
    pub weekly_workouts: i64,
    pub average_duration: f64,
    pub total_duration: i64,
    pub weekly_breakdown: Vec<WeeklyCount>,
}
