// src/stats/services.rs

use chrono::{Duration, NaiveDate};
use sqlx::SqlitePool;
use tracing::debug;

use super::models::{WeeklyCount, WorkoutStats};
use crate::common::ApiError;

/// Window counted as "this week", inclusive of the boundary day
const WEEKLY_WINDOW_DAYS: i64 = 7;
/// How far back the per-week breakdown reaches
const BREAKDOWN_WEEKS: i64 = 8;

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct StatsService {
    db: SqlitePool,
}

impl StatsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Computes every figure from a single read transaction, relative to `today`
    pub async fn compute(&self, user_id: &str, today: NaiveDate) -> Result<WorkoutStats, ApiError> {
        let week_start = (today - Duration::days(WEEKLY_WINDOW_DAYS))
            .format("%Y-%m-%d")
            .to_string();
        let breakdown_start = (today - Duration::weeks(BREAKDOWN_WEEKS))
            .format("%Y-%m-%d")
            .to_string();

        let mut tx = self.db.begin().await?;

        let (total_workouts, total_duration): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(duration), 0) FROM workout_logs WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let (total_plans,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM workout_plans WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        let (weekly_workouts,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM workout_logs WHERE user_id = ? AND date >= ?",
        )
        .bind(user_id)
        .bind(&week_start)
        .fetch_one(&mut *tx)
        .await?;

        let weekly_breakdown = sqlx::query_as::<_, WeeklyCount>(
            r#"
            SELECT strftime('%Y-%W', date) AS week, COUNT(*) AS count
            FROM workout_logs
            WHERE user_id = ? AND date >= ?
            GROUP BY week
            ORDER BY week ASC
            "#,
        )
        .bind(user_id)
        .bind(&breakdown_start)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let average_duration = if total_workouts > 0 {
            round_to_cents(total_duration as f64 / total_workouts as f64)
        } else {
            0.0
        };

        debug!(
            user_id = %user_id,
            total_workouts,
            total_plans,
            weekly_workouts,
            "Computed workout stats"
        );

        Ok(WorkoutStats {
            total_workouts,
            total_plans,
            weekly_workouts,
            average_duration,
            total_duration,
            weekly_breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(25.0), 25.0);
        assert_eq!(round_to_cents(100.0 / 3.0), 33.33);
        assert_eq!(round_to_cents(2.0 / 3.0), 0.67);
    }
}
