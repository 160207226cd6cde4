//! # Workouts Module
//!
//! Owner-scoped workout plans:
//! - Plan CRUD restricted to the authenticated owner
//! - Nested exercise entries written in a single transaction
//! - Catalog resolution by exercise name

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::workouts_routes;
