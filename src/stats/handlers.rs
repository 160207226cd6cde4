use super::services::StatsService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};
use axum::{extract::Extension, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /api/stats - Aggregates over the caller's logs and plans
pub async fn get_stats(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let stats_service = StatsService::new(app_state.db.clone());

    let stats = stats_service
        .compute(&user.id, Utc::now().date_naive())
        .await?;

    Ok(Json(stats))
}
