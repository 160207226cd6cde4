use super::handlers;
use axum::{routing::get, Router};

/// Creates the exercise catalog router
pub fn exercises_routes() -> Router {
    Router::new()
        .route(
            "/api/exercises",
            get(handlers::list_exercises).post(handlers::create_exercise),
        )
        .route(
            "/api/exercises/:id",
            get(handlers::get_exercise)
                .put(handlers::update_exercise)
                .patch(handlers::update_exercise)
                .delete(handlers::delete_exercise),
        )
}
