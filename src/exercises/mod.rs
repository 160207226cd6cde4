//! # Exercises Module
//!
//! The shared exercise catalog:
//! - Catalog CRUD (writes restricted to admins)
//! - Name-keyed get-or-create used when plans are written

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::exercises_routes;
