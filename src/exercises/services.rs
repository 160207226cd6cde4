use super::models::{CreateExerciseRequest, Exercise, UpdateExerciseRequest};
use super::validators::ExerciseValidator;
use crate::common::{generate_exercise_id, now_timestamp, ApiError, Validator};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

const EXERCISE_COLUMNS: &str = "id, name, description, target_muscle, created_at";

fn name_taken(e: &sqlx::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

/// Resolves an exercise by exact (trimmed) name, inserting it when absent.
///
/// Runs on the caller's connection so it joins the surrounding transaction.
/// The insert is conditional on the UNIQUE name, so two writers racing on the
/// same name both end up with the single surviving row.
pub async fn find_or_create_by_name(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
) -> Result<Exercise, ApiError> {
    let name = name.trim();

    let inserted = sqlx::query(
        r#"
        INSERT INTO exercises (id, name, description, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(name) DO NOTHING
        "#,
    )
    .bind(generate_exercise_id())
    .bind(name)
    .bind(description.unwrap_or(""))
    .bind(now_timestamp())
    .execute(&mut *conn)
    .await?;

    if inserted.rows_affected() > 0 {
        debug!(name = %name, "Created exercise during plan write");
    }

    let exercise = sqlx::query_as::<_, Exercise>(&format!(
        "SELECT {} FROM exercises WHERE name = ?",
        EXERCISE_COLUMNS
    ))
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(exercise)
}

pub struct ExercisesService {
    db: SqlitePool,
}

impl ExercisesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, ApiError> {
        let exercises = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {} FROM exercises ORDER BY name ASC",
            EXERCISE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(exercises)
    }

    pub async fn get_exercise(&self, exercise_id: &str) -> Result<Exercise, ApiError> {
        sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {} FROM exercises WHERE id = ?",
            EXERCISE_COLUMNS
        ))
        .bind(exercise_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))
    }

    pub async fn create_exercise(
        &self,
        request: CreateExerciseRequest,
    ) -> Result<Exercise, ApiError> {
        let validation_result = ExerciseValidator.validate(&request);
        if !validation_result.is_valid {
            return Err(ApiError::from(validation_result));
        }

        let exercise_id = generate_exercise_id();
        let name = request.name.trim();

        sqlx::query(
            r#"
            INSERT INTO exercises (id, name, description, target_muscle, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&exercise_id)
        .bind(name)
        .bind(request.description.as_deref().unwrap_or(""))
        .bind(request.target_muscle.as_deref())
        .bind(now_timestamp())
        .execute(&self.db)
        .await
        .map_err(|e| {
            if name_taken(&e) {
                ApiError::ValidationError("name: Exercise name already exists".to_string())
            } else {
                ApiError::DatabaseError(e)
            }
        })?;

        info!(exercise_id = %exercise_id, name = %name, "Created exercise");

        self.get_exercise(&exercise_id).await
    }

    pub async fn update_exercise(
        &self,
        exercise_id: &str,
        request: UpdateExerciseRequest,
    ) -> Result<Exercise, ApiError> {
        let validation_result = ExerciseValidator.validate(&request);
        if !validation_result.is_valid {
            return Err(ApiError::from(validation_result));
        }

        self.get_exercise(exercise_id).await?;

        sqlx::query(
            r#"
            UPDATE exercises
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                target_muscle = COALESCE(?, target_muscle)
            WHERE id = ?
            "#,
        )
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.description.as_deref())
        .bind(request.target_muscle.as_deref())
        .bind(exercise_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            if name_taken(&e) {
                ApiError::ValidationError("name: Exercise name already exists".to_string())
            } else {
                ApiError::DatabaseError(e)
            }
        })?;

        info!(exercise_id = %exercise_id, "Updated exercise");

        self.get_exercise(exercise_id).await
    }

    /// Removes the exercise; plan entries referencing it go with it (CASCADE)
    pub async fn delete_exercise(&self, exercise_id: &str) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(exercise_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Exercise not found".to_string()));
        }

        info!(exercise_id = %exercise_id, "Deleted exercise");
        Ok(())
    }
}
