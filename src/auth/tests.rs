//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Registration validation
//! - Register / token / refresh / me flow through the router
//! - Rejection of missing, wrong-kind and unknown-user tokens

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::test_utils::{
        access_token_for, create_test_user, send_json, setup_test_db, test_app,
    };
    use crate::common::Validator;
    use axum::http::StatusCode;
    use serde_json::json;

    fn register_request(username: &str, password: &str, email: Option<&str>) -> models::RegisterRequest {
        models::RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.map(str::to_string),
        }
    }

    // ============================================================================
    // Validator Tests
    // ============================================================================

    #[test]
    fn test_register_validator_accepts_valid_request() {
        let request = register_request("alice.smith+lifts", "s3cret!", Some("alice@example.com"));
        let result = validators::RegisterValidator.validate(&request);
        assert!(result.is_valid, "errors: {:?}", result.errors);
    }

    #[test]
    fn test_register_validator_requires_fields() {
        let request = register_request("", "", None);
        let result = validators::RegisterValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "username"));
        assert!(result.errors.iter().any(|e| e.field == "password"));
    }

    #[test]
    fn test_register_validator_rejects_bad_username_and_email() {
        let request = register_request("has space", "pw", Some("not-an-email"));
        let result = validators::RegisterValidator.validate(&request);
        assert!(result.errors.iter().any(|e| e.field == "username"));
        assert!(result.errors.iter().any(|e| e.field == "email"));

        let long = "a".repeat(151);
        let result = validators::RegisterValidator.validate(&register_request(&long, "pw", None));
        assert!(result.errors.iter().any(|e| e.field == "username"));
    }

    // ============================================================================
    // Flow Tests
    // ============================================================================

    #[tokio::test]
    async fn test_register_login_refresh_and_me() {
        let app = test_app(setup_test_db().await);

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/register",
            None,
            Some(json!({"username": "alice", "password": "squats4life", "email": "alice@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        assert_eq!(body["user"]["username"], "alice");
        assert!(body["user"].get("password_hash").is_none());

        let (status, tokens) = send_json(
            &app,
            "POST",
            "/api/token",
            None,
            Some(json!({"username": "alice", "password": "squats4life"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let access = tokens["access"].as_str().unwrap().to_string();
        let refresh = tokens["refresh"].as_str().unwrap().to_string();

        let (status, me) = send_json(&app, "GET", "/api/user", Some(&access), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["username"], "alice");
        assert_eq!(me["email"], "alice@example.com");

        let (status, rotated) = send_json(
            &app,
            "POST",
            "/api/token/refresh",
            None,
            Some(json!({"refresh": refresh})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(rotated["access"].is_string());
        assert!(rotated["refresh"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = setup_test_db().await;
        create_test_user(&pool, "bob").await;
        let app = test_app(pool);

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/register",
            None,
            Some(json!({"username": "bob", "password": "another"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_register_missing_fields_is_validation_error() {
        let app = test_app(setup_test_db().await);
        let (status, body) =
            send_json(&app, "POST", "/api/register", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let app = test_app(setup_test_db().await);
        send_json(
            &app,
            "POST",
            "/api/register",
            None,
            Some(json!({"username": "carol", "password": "right-one"})),
        )
        .await;

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/token",
            None,
            Some(json!({"username": "carol", "password": "wrong-one"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["error"],
            "No active account found with the given credentials"
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test_app(setup_test_db().await);
        let (status, body) = send_json(&app, "GET", "/api/workout-plans", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_refresh_token_cannot_authenticate_requests() {
        let pool = setup_test_db().await;
        let user_id = create_test_user(&pool, "dave").await;
        let app = test_app(pool);

        let pair = tokens::issue_token_pair(
            &crate::common::config::AppConfig::for_tests().jwt,
            &user_id,
        )
        .unwrap();

        let (status, _) = send_json(&app, "GET", "/api/user", Some(&pair.refresh), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send_json(
            &app,
            "POST",
            "/api/token/refresh",
            None,
            Some(json!({"refresh": pair.access})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_for_deleted_user_rejected() {
        let pool = setup_test_db().await;
        let token = access_token_for("U_GONE00");
        let app = test_app(pool);

        let (status, body) = send_json(&app, "GET", "/api/user", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "user not found");
    }

    #[tokio::test]
    async fn test_dev_mode_bypasses_token_check() {
        let pool = setup_test_db().await;
        let mut state = crate::common::test_utils::test_state(pool.clone());
        state.dev_mode.enabled = true;
        state.dev_mode.ensure_dev_user(&pool).await.unwrap();
        let app = crate::build_router(state);

        let (status, body) = send_json(&app, "GET", "/api/user", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "dev");

        let (status, _) = send_json(
            &app,
            "POST",
            "/api/workout-plans",
            None,
            Some(json!({"title": "Dev plan"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let app = test_app(setup_test_db().await);
        let (status, body) = send_json(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
