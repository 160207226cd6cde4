//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Account registration with bcrypt password hashes
//! - JWT access/refresh token issuance and validation
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod tokens;
pub mod validators;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use routes::auth_routes;
