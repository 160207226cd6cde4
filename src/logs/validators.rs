// src/logs/validators.rs

use super::models::{CreateLogRequest, LoggedExercise, UpdateLogRequest};
use crate::common::{validate_date_format, ValidationResult, Validator};

fn validate_date(result: &mut ValidationResult, date: &str) {
    if date.trim().is_empty() {
        result.add_error("date", "Date is required");
    } else if validate_date_format(date.trim()).is_none() {
        result.add_error("date", "Date has wrong format. Use YYYY-MM-DD");
    }
}

/// One calendar day, in minutes
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

fn validate_duration(result: &mut ValidationResult, duration: i64) {
    if duration < 0 {
        result.add_error("duration", "Duration must be zero or more minutes");
    } else if duration > MAX_DURATION_MINUTES {
        result.add_error("duration", "Duration must not exceed 1440 minutes");
    }
}

fn validate_snapshot(result: &mut ValidationResult, exercises: &[LoggedExercise]) {
    for (i, exercise) in exercises.iter().enumerate() {
        if exercise.name.trim().is_empty() {
            result.add_error(&format!("exercises[{}].name", i), "Exercise name is required");
        }
        if exercise.sets < 0 || exercise.reps < 0 {
            result.add_error(
                &format!("exercises[{}]", i),
                "Sets and reps must not be negative",
            );
        }
        if matches!(exercise.weight, Some(w) if !w.is_finite() || w < 0.0) {
            result.add_error(
                &format!("exercises[{}].weight", i),
                "Weight must be a non-negative number",
            );
        }
    }
}

pub struct LogValidator;

impl Validator<CreateLogRequest> for LogValidator {
    fn validate(&self, data: &CreateLogRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.workout_plan_id.trim().is_empty() {
            result.add_error("workout_plan_id", "Workout plan is required");
        }
        validate_date(&mut result, &data.date);
        match data.duration {
            Some(duration) => validate_duration(&mut result, duration),
            None => result.add_error("duration", "Duration is required"),
        }
        validate_snapshot(&mut result, &data.exercises);

        result
    }
}

impl Validator<UpdateLogRequest> for LogValidator {
    fn validate(&self, data: &UpdateLogRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(plan_id) = &data.workout_plan_id {
            if plan_id.trim().is_empty() {
                result.add_error("workout_plan_id", "Workout plan is required");
            }
        }
        if let Some(date) = &data.date {
            validate_date(&mut result, date);
        }
        if let Some(duration) = data.duration {
            validate_duration(&mut result, duration);
        }
        if let Some(exercises) = &data.exercises {
            validate_snapshot(&mut result, exercises);
        }

        result
    }
}
