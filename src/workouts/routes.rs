use super::handlers;
use axum::{routing::get, Router};

/// Creates the workout plan router
pub fn workouts_routes() -> Router {
    Router::new()
        .route(
            "/api/workout-plans",
            get(handlers::list_plans).post(handlers::create_plan),
        )
        .route(
            "/api/workout-plans/:id",
            get(handlers::get_plan)
                .put(handlers::update_plan)
                .patch(handlers::update_plan)
                .delete(handlers::delete_plan),
        )
}
