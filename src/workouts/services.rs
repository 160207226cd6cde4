// src/workouts/services.rs

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use super::models::{
    CreatePlanRequest, ExerciseSpec, PlanExercise, UpdatePlanRequest, WorkoutPlan, WorkoutPlanRow,
};
use super::validators::PlanValidator;
use crate::common::{
    generate_plan_exercise_id, generate_record_uuid, now_timestamp, parse_record_uuid, ApiError,
    Validator,
};
use crate::exercises::services::find_or_create_by_name;

const PLAN_COLUMNS: &str = "id, title, description, created_at, updated_at";

const ENTRY_SELECT: &str = r#"
    SELECT we.id, we.workout_plan_id, we.exercise_id, e.name, e.description,
           we.position, we.sets, we.reps, we.weight
    FROM workout_exercises we
    JOIN exercises e ON e.id = we.exercise_id
"#;

fn plan_not_found() -> ApiError {
    ApiError::NotFound("Workout plan not found".to_string())
}

/// Owner-scoped plan lookup. A plan owned by someone else is indistinguishable from a missing one.
pub async fn find_owned_plan(
    conn: &mut SqliteConnection,
    user_id: &str,
    plan_id: &str,
) -> Result<WorkoutPlanRow, ApiError> {
    sqlx::query_as::<_, WorkoutPlanRow>(&format!(
        "SELECT {} FROM workout_plans WHERE id = ? AND user_id = ?",
        PLAN_COLUMNS
    ))
    .bind(plan_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(plan_not_found)
}

async fn load_entries(
    conn: &mut SqliteConnection,
    plan_id: &str,
) -> Result<Vec<PlanExercise>, ApiError> {
    let entries = sqlx::query_as::<_, PlanExercise>(&format!(
        "{} WHERE we.workout_plan_id = ? ORDER BY we.position ASC",
        ENTRY_SELECT
    ))
    .bind(plan_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(entries)
}

async fn read_plan(
    conn: &mut SqliteConnection,
    user_id: &str,
    plan_id: &str,
) -> Result<WorkoutPlan, ApiError> {
    let row = find_owned_plan(&mut *conn, user_id, plan_id).await?;
    let entries = load_entries(&mut *conn, plan_id).await?;
    Ok(WorkoutPlan::from_parts(row, entries))
}

/// Resolves each spec against the catalog and writes its plan entry, in order
async fn insert_entries(
    conn: &mut SqliteConnection,
    plan_id: &str,
    specs: &[ExerciseSpec],
) -> Result<(), ApiError> {
    for (position, spec) in specs.iter().enumerate() {
        let exercise =
            find_or_create_by_name(&mut *conn, &spec.name, spec.description.as_deref()).await?;

        sqlx::query(
            r#"
            INSERT INTO workout_exercises (id, workout_plan_id, exercise_id, position, sets, reps, weight)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(generate_plan_exercise_id())
        .bind(plan_id)
        .bind(&exercise.id)
        .bind(position as i64)
        .bind(spec.sets)
        .bind(spec.reps)
        .bind(spec.weight)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

pub struct PlansService {
    db: SqlitePool,
}

impl PlansService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    // ============================================================================
    // Owner-scoped Reads
    // ============================================================================

    /// The caller's plans, newest first
    pub async fn list_plans(&self, user_id: &str) -> Result<Vec<WorkoutPlan>, ApiError> {
        let mut tx = self.db.begin().await?;

        let rows = sqlx::query_as::<_, WorkoutPlanRow>(&format!(
            "SELECT {} FROM workout_plans WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
            PLAN_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        let entries = sqlx::query_as::<_, PlanExercise>(&format!(
            r#"{}
            JOIN workout_plans wp ON wp.id = we.workout_plan_id
            WHERE wp.user_id = ?
            ORDER BY we.workout_plan_id, we.position ASC"#,
            ENTRY_SELECT
        ))
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut by_plan: HashMap<String, Vec<PlanExercise>> = HashMap::new();
        for entry in entries {
            by_plan
                .entry(entry.workout_plan_id.clone())
                .or_default()
                .push(entry);
        }

        let plans: Vec<WorkoutPlan> = rows
            .into_iter()
            .map(|row| {
                let exercises = by_plan.remove(&row.id).unwrap_or_default();
                WorkoutPlan::from_parts(row, exercises)
            })
            .collect();

        debug!(user_id = %user_id, plan_count = plans.len(), "Listed workout plans");
        Ok(plans)
    }

    pub async fn get_plan(&self, user_id: &str, plan_id: &str) -> Result<WorkoutPlan, ApiError> {
        let plan_id = parse_record_uuid(plan_id).ok_or_else(plan_not_found)?;

        let mut tx = self.db.begin().await?;
        let plan = read_plan(&mut tx, user_id, &plan_id).await?;
        tx.commit().await?;

        Ok(plan)
    }

    // ============================================================================
    // Write Pipeline
    // ============================================================================

    /// Creates the plan and all of its entries as one unit
    pub async fn create_plan(
        &self,
        user_id: &str,
        request: CreatePlanRequest,
    ) -> Result<WorkoutPlan, ApiError> {
        let validation_result = PlanValidator.validate(&request);
        if !validation_result.is_valid {
            warn!(user_id = %user_id, errors = ?validation_result.errors, "Plan creation validation failed");
            return Err(ApiError::from(validation_result));
        }

        let plan_id = generate_record_uuid();
        let now = now_timestamp();

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO workout_plans (id, user_id, title, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&plan_id)
        .bind(user_id)
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        insert_entries(&mut tx, &plan_id, &request.exercises).await?;

        let plan = read_plan(&mut tx, user_id, &plan_id).await?;
        tx.commit().await?;

        info!(
            user_id = %user_id,
            plan_id = %plan_id,
            exercise_count = plan.exercises.len(),
            "Workout plan created"
        );

        Ok(plan)
    }

    pub async fn update_plan(
        &self,
        user_id: &str,
        plan_id: &str,
        request: UpdatePlanRequest,
    ) -> Result<WorkoutPlan, ApiError> {
        let plan_id = parse_record_uuid(plan_id).ok_or_else(plan_not_found)?;

        let mut tx = self.db.begin().await?;
        find_owned_plan(&mut tx, user_id, &plan_id).await?;

        let validation_result = PlanValidator.validate(&request);
        if !validation_result.is_valid {
            warn!(user_id = %user_id, plan_id = %plan_id, errors = ?validation_result.errors, "Plan update validation failed");
            return Err(ApiError::from(validation_result));
        }

        if request.title.is_none() && request.description.is_none() && request.exercises.is_none()
        {
            let plan = read_plan(&mut tx, user_id, &plan_id).await?;
            tx.commit().await?;
            return Ok(plan);
        }

        sqlx::query(
            r#"
            UPDATE workout_plans
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(request.title.as_deref().map(str::trim))
        .bind(request.description.as_deref())
        .bind(now_timestamp())
        .bind(&plan_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if let Some(specs) = &request.exercises {
            sqlx::query("DELETE FROM workout_exercises WHERE workout_plan_id = ?")
                .bind(&plan_id)
                .execute(&mut *tx)
                .await?;
            insert_entries(&mut tx, &plan_id, specs).await?;
        }

        let plan = read_plan(&mut tx, user_id, &plan_id).await?;
        tx.commit().await?;

        info!(user_id = %user_id, plan_id = %plan_id, "Workout plan updated");
        Ok(plan)
    }

    /// Deletes the plan; its entries and logs are removed by CASCADE
    pub async fn delete_plan(&self, user_id: &str, plan_id: &str) -> Result<(), ApiError> {
        let plan_id = parse_record_uuid(plan_id).ok_or_else(plan_not_found)?;

        let mut tx = self.db.begin().await?;
        find_owned_plan(&mut tx, user_id, &plan_id).await?;

        sqlx::query("DELETE FROM workout_plans WHERE id = ? AND user_id = ?")
            .bind(&plan_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(user_id = %user_id, plan_id = %plan_id, "Workout plan deleted");
        Ok(())
    }
}
