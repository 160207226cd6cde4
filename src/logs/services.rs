// src/logs/services.rs

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use super::models::{CreateLogRequest, LoggedExercise, UpdateLogRequest, WorkoutLog, WorkoutLogRow};
use super::validators::LogValidator;
use crate::common::{
    generate_record_uuid, now_timestamp, parse_record_uuid, validate_date_format, ApiError,
    Validator,
};
use crate::workouts::services::find_owned_plan;

const LOG_SELECT: &str = r#"
    SELECT l.id, l.workout_plan_id, p.title AS workout_plan_title,
           l.date, l.duration, l.notes, l.exercises, l.created_at
    FROM workout_logs l
    JOIN workout_plans p ON p.id = l.workout_plan_id
"#;

const FOREIGN_PLAN: &str = "workout_plan_id: You can only log workouts for your own plans";

fn log_not_found() -> ApiError {
    ApiError::NotFound("Workout log not found".to_string())
}

/// Resolves the referenced plan and requires the caller to own it.
/// Returns the canonical plan id.
async fn ensure_own_plan(
    conn: &mut SqliteConnection,
    user_id: &str,
    raw_plan_id: &str,
) -> Result<String, ApiError> {
    let rejected = || {
        warn!(user_id = %user_id, plan_id = %raw_plan_id, "Rejected log against a plan the user does not own");
        ApiError::ValidationError(FOREIGN_PLAN.to_string())
    };

    let plan_id = parse_record_uuid(raw_plan_id).ok_or_else(rejected)?;

    match find_owned_plan(conn, user_id, &plan_id).await {
        Ok(plan) => Ok(plan.id),
        Err(ApiError::NotFound(_)) => Err(rejected()),
        Err(e) => Err(e),
    }
}

/// Normalizes an already validated date to YYYY-MM-DD
fn canonical_date(raw: &str) -> Result<String, ApiError> {
    validate_date_format(raw.trim())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ApiError::ValidationError("date: Date has wrong format. Use YYYY-MM-DD".to_string()))
}

fn snapshot_json(exercises: &[LoggedExercise]) -> Result<String, ApiError> {
    let trimmed: Vec<LoggedExercise> = exercises
        .iter()
        .map(|e| LoggedExercise {
            name: e.name.trim().to_string(),
            ..e.clone()
        })
        .collect();

    serde_json::to_string(&trimmed)
        .map_err(|e| ApiError::InternalServer(format!("Failed to encode exercise snapshot: {}", e)))
}

async fn read_log(
    conn: &mut SqliteConnection,
    user_id: &str,
    log_id: &str,
) -> Result<WorkoutLog, ApiError> {
    let row = sqlx::query_as::<_, WorkoutLogRow>(&format!(
        "{} WHERE l.id = ? AND l.user_id = ?",
        LOG_SELECT
    ))
    .bind(log_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(log_not_found)?;

    WorkoutLog::try_from(row)
}

pub struct LogsService {
    db: SqlitePool,
}

impl LogsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// The caller's logs, most recent workout first
    pub async fn list_logs(&self, user_id: &str) -> Result<Vec<WorkoutLog>, ApiError> {
        let rows = sqlx::query_as::<_, WorkoutLogRow>(&format!(
            "{} WHERE l.user_id = ? ORDER BY l.date DESC, l.created_at DESC, l.rowid DESC",
            LOG_SELECT
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        debug!(user_id = %user_id, log_count = rows.len(), "Listed workout logs");

        rows.into_iter().map(WorkoutLog::try_from).collect()
    }

    pub async fn get_log(&self, user_id: &str, log_id: &str) -> Result<WorkoutLog, ApiError> {
        let log_id = parse_record_uuid(log_id).ok_or_else(log_not_found)?;

        let mut conn = self.db.acquire().await?;
        read_log(&mut conn, user_id, &log_id).await
    }

    pub async fn create_log(
        &self,
        user_id: &str,
        request: CreateLogRequest,
    ) -> Result<WorkoutLog, ApiError> {
        let validation_result = LogValidator.validate(&request);
        if !validation_result.is_valid {
            warn!(user_id = %user_id, errors = ?validation_result.errors, "Log creation validation failed");
            return Err(ApiError::from(validation_result));
        }

        let date = canonical_date(&request.date)?;
        let exercises = snapshot_json(&request.exercises)?;
        let duration = request.duration.unwrap_or_default();
        let log_id = generate_record_uuid();

        let mut tx = self.db.begin().await?;
        let plan_id = ensure_own_plan(&mut tx, user_id, &request.workout_plan_id).await?;

        sqlx::query(
            r#"
            INSERT INTO workout_logs (id, user_id, workout_plan_id, date, duration, notes, exercises, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log_id)
        .bind(user_id)
        .bind(&plan_id)
        .bind(&date)
        .bind(duration)
        .bind(&request.notes)
        .bind(&exercises)
        .bind(now_timestamp())
        .execute(&mut *tx)
        .await?;

        let log = read_log(&mut tx, user_id, &log_id).await?;
        tx.commit().await?;

        info!(user_id = %user_id, log_id = %log_id, plan_id = %plan_id, duration, "Workout logged");
        Ok(log)
    }

    pub async fn update_log(
        &self,
        user_id: &str,
        log_id: &str,
        request: UpdateLogRequest,
    ) -> Result<WorkoutLog, ApiError> {
        let log_id = parse_record_uuid(log_id).ok_or_else(log_not_found)?;

        let mut tx = self.db.begin().await?;
        let existing = read_log(&mut tx, user_id, &log_id).await?;

        let validation_result = LogValidator.validate(&request);
        if !validation_result.is_valid {
            warn!(user_id = %user_id, log_id = %log_id, errors = ?validation_result.errors, "Log update validation failed");
            return Err(ApiError::from(validation_result));
        }

        let plan_id = match request.workout_plan_id.as_deref() {
            Some(raw) => Some(ensure_own_plan(&mut tx, user_id, raw).await?),
            None => None,
        };
        let date = request.date.as_deref().map(canonical_date).transpose()?;
        let exercises = request
            .exercises
            .as_deref()
            .map(snapshot_json)
            .transpose()?;

        sqlx::query(
            r#"
            UPDATE workout_logs
            SET workout_plan_id = COALESCE(?, workout_plan_id),
                date = COALESCE(?, date),
                duration = COALESCE(?, duration),
                notes = COALESCE(?, notes),
                exercises = COALESCE(?, exercises)
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(plan_id.as_deref())
        .bind(date.as_deref())
        .bind(request.duration)
        .bind(request.notes.as_deref())
        .bind(exercises.as_deref())
        .bind(&existing.id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let log = read_log(&mut tx, user_id, &log_id).await?;
        tx.commit().await?;

        info!(user_id = %user_id, log_id = %log_id, "Workout log updated");
        Ok(log)
    }

    pub async fn delete_log(&self, user_id: &str, log_id: &str) -> Result<(), ApiError> {
        let log_id = parse_record_uuid(log_id).ok_or_else(log_not_found)?;

        let mut tx = self.db.begin().await?;
        read_log(&mut tx, user_id, &log_id).await?;

        sqlx::query("DELETE FROM workout_logs WHERE id = ? AND user_id = ?")
            .bind(&log_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(user_id = %user_id, log_id = %log_id, "Workout log deleted");
        Ok(())
    }
}
