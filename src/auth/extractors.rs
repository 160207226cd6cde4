//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::{TokenType, User};
use super::tokens::{bearer_token, verify_token};
use crate::common::{ApiError, AppState};

/// Authenticated user extractor
///
/// Resolves the caller from a Bearer access token and loads the user row.
/// Handlers taking this argument never run for unauthenticated requests.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        // DEV MODE: Bypass authentication completely
        if app_state.dev_mode.is_enabled() {
            let dev_user = app_state.dev_mode.create_dev_user();
            let is_admin =
                app_state.dev_mode.user_is_admin || app_state.config.is_admin(&dev_user.username);

            debug!(
                user_id = %dev_user.id,
                username = %dev_user.username,
                is_admin = is_admin,
                "DEV MODE: Authentication bypassed"
            );

            return Ok(AuthedUser {
                id: dev_user.id,
                username: dev_user.username,
                is_admin,
            });
        }

        let header = match parts.headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) {
            Some(h) => h,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized(
                    "Authentication credentials were not provided".into(),
                ));
            }
        };

        let claims = verify_token(&app_state.config.jwt, bearer_token(header), TokenType::Access)
            .map_err(|e| {
                warn!(error = %e, "JWT token validation failed");
                ApiError::from(e)
            })?;

        let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(&claims.sub)
            .fetch_optional(&app_state.db)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    user_id = %claims.sub,
                    "Database error during user lookup in authentication"
                );
                ApiError::DatabaseError(e)
            })?;

        match user {
            Some(u) => {
                let is_admin = app_state.config.is_admin(&u.username);
                debug!(user_id = %u.id, is_admin = is_admin, "User authenticated");
                Ok(AuthedUser {
                    id: u.id,
                    username: u.username,
                    is_admin,
                })
            }
            None => {
                warn!(user_id = %claims.sub, "Authentication failed: user not found in database");
                Err(ApiError::Unauthorized("user not found".into()))
            }
        }
    }
}
