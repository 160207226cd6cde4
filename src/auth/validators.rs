// src/auth/validators.rs

use regex::Regex;
use std::sync::OnceLock;

use super::models::RegisterRequest;
use crate::common::{ValidationResult, Validator};

const USERNAME_MAX_LEN: usize = 150;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"))
}

pub struct RegisterValidator;

impl Validator<RegisterRequest> for RegisterValidator {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        let username = data.username.trim();
        if username.is_empty() {
            result.add_error("username", "This field is required");
        } else if username.chars().count() > USERNAME_MAX_LEN {
            result.add_error("username", "Username must be at most 150 characters");
        } else if !username_pattern().is_match(username) {
            result.add_error(
                "username",
                "Username may contain only letters, digits and @/./+/-/_",
            );
        }

        if data.password.is_empty() {
            result.add_error("password", "This field is required");
        }

        if let Some(email) = data.email.as_deref().filter(|e| !e.is_empty()) {
            if !email_pattern().is_match(email) {
                result.add_error("email", "Enter a valid email address");
            }
        }

        result
    }
}
