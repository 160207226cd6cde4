use super::models::{CreatePlanRequest, UpdatePlanRequest};
use super::services::PlansService;
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

/// GET /api/workout-plans - List the caller's plans
pub async fn list_plans(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let plans_service = PlansService::new(app_state.db.clone());

    Ok(Json(plans_service.list_plans(&user.id).await?))
}

/// POST /api/workout-plans - Create a plan with its exercises
pub async fn create_plan(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreatePlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let plans_service = PlansService::new(app_state.db.clone());

    let plan = plans_service.create_plan(&user.id, request).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/workout-plans/:id
pub async fn get_plan(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(plan_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let plans_service = PlansService::new(app_state.db.clone());

    Ok(Json(plans_service.get_plan(&user.id, &plan_id).await?))
}

/// PUT|PATCH /api/workout-plans/:id
pub async fn update_plan(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(plan_id): Path<String>,
    Json(request): Json<UpdatePlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let plans_service = PlansService::new(app_state.db.clone());

    let plan = plans_service.update_plan(&user.id, &plan_id, request).await?;

    Ok(Json(plan))
}

/// DELETE /api/workout-plans/:id
pub async fn delete_plan(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(plan_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let plans_service = PlansService::new(app_state.db.clone());

    plans_service.delete_plan(&user.id, &plan_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
