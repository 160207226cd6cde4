use super::models::{CreateExerciseRequest, UpdateExerciseRequest};
use super::services::ExercisesService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Catalog entries are shared by every user's plans, so only admins may rewrite them
fn require_admin(user: &AuthedUser) -> Result<(), ApiError> {
    if user.is_admin {
        Ok(())
    } else {
        warn!(
            user_id = %user.id,
            username = %user.username,
            "Non-admin attempted to modify the exercise catalog"
        );
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

/// GET /api/exercises - List the exercise catalog
pub async fn list_exercises(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let exercises_service = ExercisesService::new(app_state.db.clone());

    Ok(Json(exercises_service.list_exercises().await?))
}

/// POST /api/exercises - Add an exercise to the catalog
pub async fn create_exercise(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Json(request): Json<CreateExerciseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let exercises_service = ExercisesService::new(app_state.db.clone());

    let exercise = exercises_service.create_exercise(request).await?;

    Ok((StatusCode::CREATED, Json(exercise)))
}

/// GET /api/exercises/:id - Get a catalog entry
pub async fn get_exercise(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Path(exercise_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let exercises_service = ExercisesService::new(app_state.db.clone());

    Ok(Json(exercises_service.get_exercise(&exercise_id).await?))
}

/// PUT /api/exercises/:id - Update a catalog entry (admin)
pub async fn update_exercise(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(exercise_id): Path<String>,
    Json(request): Json<UpdateExerciseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    let app_state = state.read().await;
    let exercises_service = ExercisesService::new(app_state.db.clone());

    let exercise = exercises_service
        .update_exercise(&exercise_id, request)
        .await?;

    Ok(Json(exercise))
}

/// DELETE /api/exercises/:id - Delete a catalog entry (admin)
pub async fn delete_exercise(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(exercise_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    let app_state = state.read().await;
    let exercises_service = ExercisesService::new(app_state.db.clone());

    exercises_service.delete_exercise(&exercise_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
