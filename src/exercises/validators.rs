use super::models::{CreateExerciseRequest, UpdateExerciseRequest};
use crate::common::{ValidationResult, Validator};

pub const EXERCISE_NAME_MAX_LEN: usize = 100;

/// Shared by catalog writes and the exercise entries nested in plans
pub fn validate_exercise_name(result: &mut ValidationResult, field: &str, name: &str) {
    if name.trim().is_empty() {
        result.add_error(field, "Exercise name is required");
    } else if name.trim().chars().count() > EXERCISE_NAME_MAX_LEN {
        result.add_error(field, "Exercise name must not exceed 100 characters");
    }
}

pub struct ExerciseValidator;

impl Validator<CreateExerciseRequest> for ExerciseValidator {
    fn validate(&self, data: &CreateExerciseRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        validate_exercise_name(&mut result, "name", &data.name);

        if let Some(muscle) = &data.target_muscle {
            if muscle.chars().count() > 100 {
                result.add_error("target_muscle", "Target muscle must not exceed 100 characters");
            }
        }

        result
    }
}

impl Validator<UpdateExerciseRequest> for ExerciseValidator {
    fn validate(&self, data: &UpdateExerciseRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.is_none() && data.description.is_none() && data.target_muscle.is_none() {
            result.add_error("general", "At least one field must be provided for update");
            return result;
        }

        if let Some(name) = &data.name {
            validate_exercise_name(&mut result, "name", name);
        }

        result
    }
}
