// Common validation types and traits

use chrono::{Datelike, NaiveDate};

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
            self.errors.extend(other.errors);
        }
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// Years are limited to four digits so stored dates compare correctly as text.
pub fn validate_date_format(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .filter(|d| (1..=9999).contains(&d.year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_errors_from_both_sides() {
        let mut outer = ValidationResult::new();
        outer.add_error("title", "Title is required");

        let mut inner = ValidationResult::new();
        inner.add_error("exercises[1].name", "Exercise name is required");

        outer.merge(inner);
        assert!(!outer.is_valid);
        assert_eq!(outer.errors.len(), 2);
    }

    #[test]
    fn test_merge_valid_result_is_noop() {
        let mut outer = ValidationResult::new();
        outer.merge(ValidationResult::new());
        assert!(outer.is_valid);
        assert!(outer.errors.is_empty());
    }

    #[test]
    fn test_date_format() {
        assert!(validate_date_format("2024-02-29").is_some());
        assert!(validate_date_format("2023-02-29").is_none());
        assert!(validate_date_format("29/02/2024").is_none());
    }

    #[test]
    fn test_date_year_must_have_four_digits() {
        assert!(validate_date_format("+10000-01-01").is_none());
        assert!(validate_date_format("10000-01-01").is_none());
        assert!(validate_date_format("-0001-01-01").is_none());
        assert!(validate_date_format("0000-01-01").is_none());
        assert_eq!(
            validate_date_format("0999-01-01").map(|d| d.format("%Y-%m-%d").to_string()),
            Some("0999-01-01".to_string())
        );
    }
}
