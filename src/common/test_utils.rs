// src/common/test_utils.rs
//! In-memory database fixtures shared by the module tests

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use super::config::AppConfig;
use super::dev_mode::DevModeConfig;
use super::{generate_user_id, migrations, AppState};

/// One connection only: every `sqlite::memory:` connection is its own database
pub async fn setup_test_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    migrations::run_migrations(&pool).await.unwrap();
    pool
}

/// Inserts a user row directly, skipping password hashing
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> String {
    let id = generate_user_id();
    sqlx::query("INSERT INTO users (id, username, email, password_hash) VALUES (?, ?, NULL, '!')")
        .bind(&id)
        .bind(username)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState {
        db: pool,
        config: AppConfig::for_tests(),
        dev_mode: DevModeConfig::disabled(),
    }
}

/// Drives one request through the router and decodes the JSON reply (`Null` when empty)
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Access token for an existing user, signed with the test secret
pub fn access_token_for(user_id: &str) -> String {
    crate::auth::tokens::issue_token_pair(&AppConfig::for_tests().jwt, user_id)
        .unwrap()
        .access
}

/// The full application router over the given pool
pub fn test_app(pool: SqlitePool) -> axum::Router {
    crate::build_router(test_state(pool))
}
