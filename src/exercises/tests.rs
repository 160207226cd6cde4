//! Tests for exercises module
//!
//! These tests verify:
//! - Catalog validation
//! - Name-keyed get-or-create resolution
//! - Duplicate names and admin-only catalog writes

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::test_utils::{
        access_token_for, create_test_user, send_json, setup_test_db, test_app,
    };
    use crate::common::{ApiError, Validator};
    use axum::http::StatusCode;
    use serde_json::json;

    fn create_request(name: &str) -> models::CreateExerciseRequest {
        models::CreateExerciseRequest {
            name: name.to_string(),
            description: Some("Compound lift".to_string()),
            target_muscle: Some("Legs".to_string()),
        }
    }

    #[test]
    fn test_create_validation_requires_name() {
        let result = validators::ExerciseValidator.validate(&create_request("   "));
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn test_update_validation_requires_some_field() {
        let request = models::UpdateExerciseRequest {
            name: None,
            description: None,
            target_muscle: None,
        };
        let result = validators::ExerciseValidator.validate(&request);
        assert!(result.errors.iter().any(|e| e.field == "general"));
    }

    #[tokio::test]
    async fn test_find_or_create_reuses_existing_row() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = services::find_or_create_by_name(&mut *conn, "Squat", Some("Back squat"))
            .await
            .unwrap();
        let second = services::find_or_create_by_name(&mut *conn, " Squat ", Some("ignored"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.description, "Back squat");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercises")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_duplicate_catalog_name_is_validation_error() {
        let service = services::ExercisesService::new(setup_test_db().await);
        service.create_exercise(create_request("Deadlift")).await.unwrap();

        let err = service
            .create_exercise(create_request("Deadlift"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_and_list_ordering() {
        let service = services::ExercisesService::new(setup_test_db().await);
        let row = service.create_exercise(create_request("Row")).await.unwrap();
        service.create_exercise(create_request("Bench Press")).await.unwrap();

        let updated = service
            .update_exercise(
                &row.id,
                models::UpdateExerciseRequest {
                    name: None,
                    description: None,
                    target_muscle: Some("Back".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.target_muscle.as_deref(), Some("Back"));
        assert_eq!(updated.name, "Row");

        let names: Vec<String> = service
            .list_exercises()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Bench Press".to_string(), "Row".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_exercise_is_not_found() {
        let service = services::ExercisesService::new(setup_test_db().await);
        assert!(matches!(
            service.get_exercise("E_NOPE00").await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_exercise("E_NOPE00").await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_catalog_delete_requires_admin() {
        let pool = setup_test_db().await;
        let athlete = create_test_user(&pool, "athlete").await;
        let coach = create_test_user(&pool, "coach").await;
        let app = test_app(pool);

        let (status, created) = send_json(
            &app,
            "POST",
            "/api/exercises",
            Some(&access_token_for(&athlete)),
            Some(json!({"name": "Lunge"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/api/exercises/{}", created["id"].as_str().unwrap());

        let (status, _) =
            send_json(&app, "DELETE", &uri, Some(&access_token_for(&athlete)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) =
            send_json(&app, "DELETE", &uri, Some(&access_token_for(&coach)), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
