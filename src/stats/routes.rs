use super::handlers;
use axum::{routing::get, Router};

pub fn stats_routes() -> Router {
    Router::new().route("/api/stats", get(handlers::get_stats))
}
