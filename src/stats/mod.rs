//! # Stats Module
//!
//! Per-user workout aggregates computed on demand.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;


pub use routes::stats_routes;
