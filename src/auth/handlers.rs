//! Authentication handlers

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::extractors::AuthedUser;
use super::models::{
    RefreshRequest, RegisterRequest, RegisterResponse, TokenPair, TokenRequest, TokenType, User,
    UserInfo,
};
use super::password::{hash_password, verify_password};
use super::tokens::{issue_token_pair, verify_token};
use super::validators::RegisterValidator;
use crate::common::{
    generate_user_id, now_timestamp, safe_token_log, ApiError, AppState, Validator,
};

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

/// POST /api/register
/// Creates an account from a username and password
///
/// # Request Body
/// ```json
/// { "username": "alice", "password": "…", "email": "alice@example.com" }
/// ```
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = RegisterValidator.validate(&request);
    if !validation_result.is_valid {
        warn!(errors = ?validation_result.errors, "Registration validation failed");
        return Err(ApiError::from(validation_result));
    }

    let username = request.username.trim().to_string();
    let email = request.email.filter(|e| !e.is_empty());

    let taken: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(&username)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if taken.is_some() {
        warn!(username = %username, "Registration rejected: username taken");
        return Err(ApiError::ValidationError(
            "username: A user with that username already exists".to_string(),
        ));
    }

    let password_hash = hash_password(request.password).await?;
    let user_id = generate_user_id();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user_id)
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(now_timestamp())
    .execute(&state.db)
    .await
    .map_err(|e| {
        // Lost a race with a concurrent registration of the same name
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::ValidationError(
                "username: A user with that username already exists".to_string(),
            )
        } else {
            error!(error = %e, username = %username, "Database error creating user");
            ApiError::DatabaseError(e)
        }
    })?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&user_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(user_id = %user_id, username = %username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserInfo::from(user),
        }),
    ))
}

/// POST /api/token
/// Exchanges username/password for an access/refresh token pair
pub async fn obtain_token(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let state = state_lock.read().await.clone();

    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::ValidationError(
            "username and password are required".to_string(),
        ));
    }

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(request.username.trim())
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error during login lookup");
            ApiError::DatabaseError(e)
        })?;

    let user = match user {
        Some(u) => u,
        None => {
            warn!("Login failed: unknown username");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
    };

    if !verify_password(request.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let pair = issue_token_pair(&state.config.jwt, &user.id)?;
    info!(user_id = %user.id, "Issued token pair");

    Ok(Json(pair))
}

/// POST /api/token/refresh
/// Rotates a refresh token into a new token pair
pub async fn refresh_token(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let state = state_lock.read().await.clone();

    let claims = verify_token(&state.config.jwt, &request.refresh, TokenType::Refresh)
        .map_err(|e| {
            warn!(error = %e, token = %safe_token_log(&request.refresh), "Refresh rejected");
            ApiError::from(e)
        })?;

    // The account may have been removed since the refresh token was issued
    let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
        .bind(&claims.sub)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if exists.is_none() {
        return Err(ApiError::Unauthorized("user not found".to_string()));
    }

    let pair = issue_token_pair(&state.config.jwt, &claims.sub)?;
    debug!(user_id = %claims.sub, "Refreshed token pair");

    Ok(Json(pair))
}

/// GET /api/user
/// Returns the authenticated user's public profile
pub async fn me_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<UserInfo>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserInfo::from(user)))
}
