use super::models::{CreateLogRequest, UpdateLogRequest};
use super::services::LogsService;
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

/// GET /api/workout-logs - List the caller's logged workouts
pub async fn list_logs(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let logs_service = LogsService::new(app_state.db.clone());

    Ok(Json(logs_service.list_logs(&user.id).await?))
}

/// POST /api/workout-logs - Log a completed workout against one of the caller's plans
pub async fn create_log(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateLogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let logs_service = LogsService::new(app_state.db.clone());

    let log = logs_service.create_log(&user.id, request).await?;

    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn get_log(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(log_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let logs_service = LogsService::new(app_state.db.clone());

    Ok(Json(logs_service.get_log(&user.id, &log_id).await?))
}

pub async fn update_log(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(log_id): Path<String>,
    Json(request): Json<UpdateLogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let logs_service = LogsService::new(app_state.db.clone());

    Ok(Json(logs_service.update_log(&user.id, &log_id, request).await?))
}

pub async fn delete_log(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(log_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let logs_service = LogsService::new(app_state.db.clone());

    logs_service.delete_log(&user.id, &log_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
