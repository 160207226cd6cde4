//! # Logs Module
//!
//! Completed workout sessions, each recorded against one of the caller's
//! own plans with a frozen snapshot of the exercises performed.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::logs_routes;
