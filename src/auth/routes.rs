//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/register` - Create an account
/// - `POST /api/token` - Obtain an access/refresh token pair
/// - `POST /api/token/refresh` - Rotate a refresh token
/// - `GET /api/user` - Get current user information
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/token", post(handlers::obtain_token))
        .route("/api/token/refresh", post(handlers::refresh_token))
        .route("/api/user", get(handlers::me_handler))
}
