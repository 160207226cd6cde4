// src/workouts/validators.rs

use super::models::{CreatePlanRequest, ExerciseSpec, UpdatePlanRequest};
use crate::common::{ValidationResult, Validator};
use crate::exercises::validators::validate_exercise_name;

const TITLE_MAX_LEN: usize = 200;

fn validate_title(result: &mut ValidationResult, title: &str) {
    if title.trim().is_empty() {
        result.add_error("title", "Title is required");
    } else if title.chars().count() > TITLE_MAX_LEN {
        result.add_error("title", "Title must not exceed 200 characters");
    }
}

fn validate_specs(specs: &[ExerciseSpec]) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (i, spec) in specs.iter().enumerate() {
        validate_exercise_name(&mut result, &format!("exercises[{}].name", i), &spec.name);

        if spec.sets < 1 {
            result.add_error(&format!("exercises[{}].sets", i), "Sets must be at least 1");
        }
        if spec.reps < 1 {
            result.add_error(&format!("exercises[{}].reps", i), "Reps must be at least 1");
        }
        if let Some(weight) = spec.weight {
            if !weight.is_finite() || weight < 0.0 {
                result.add_error(
                    &format!("exercises[{}].weight", i),
                    "Weight must be a non-negative number",
                );
            }
        }
    }
    result
}

pub struct PlanValidator;

impl Validator<CreatePlanRequest> for PlanValidator {
    fn validate(&self, data: &CreatePlanRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        validate_title(&mut result, &data.title);
        result.merge(validate_specs(&data.exercises));
        result
    }
}

impl Validator<UpdatePlanRequest> for PlanValidator {
    fn validate(&self, data: &UpdatePlanRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            validate_title(&mut result, title);
        }
        if let Some(specs) = &data.exercises {
            result.merge(validate_specs(specs));
        }

        result
    }
}
