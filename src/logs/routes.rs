use super::handlers;
use axum::{routing::get, Router};

/// Creates the workout log router
pub fn logs_routes() -> Router {
    Router::new()
        .route(
            "/api/workout-logs",
            get(handlers::list_logs).post(handlers::create_log),
        )
        .route(
            "/api/workout-logs/:id",
            get(handlers::get_log)
                .put(handlers::update_log)
                .patch(handlers::update_log)
                .delete(handlers::delete_log),
        )
}
