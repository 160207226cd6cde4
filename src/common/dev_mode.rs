// src/common/dev_mode.rs
//! Development mode configuration and utilities
//! Allows bypassing authentication for testing purposes

use crate::common::now_timestamp;
use sqlx::SqlitePool;
use std::env;
use tracing::{error, info};

use crate::auth::models::User;

/// Fixed id so every dev-mode request maps onto the same owner
pub const DEV_USER_ID: &str = "U_DEV000";

#[derive(Debug, thiserror::Error)]
pub enum DevUserError {
    #[error("DEV_USERNAME '{0}' already belongs to a registered account; pick another name")]
    UsernameTaken(String),

    #[error("failed to provision dev user: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub username: String,
    pub user_is_admin: bool,
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let username = env::var("DEV_USERNAME").unwrap_or_else(|_| "dev".to_string());

        let user_is_admin = env::var("DEV_USER_IS_ADMIN")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        Self {
            enabled,
            username,
            user_is_admin,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            username: "dev".to_string(),
            user_is_admin: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn create_dev_user(&self) -> User {
        User {
            id: DEV_USER_ID.to_string(),
            username: self.username.clone(),
            email: None,
            // Not a bcrypt hash, so password login for this account always fails
            password_hash: "!".to_string(),
            created_at: Some(now_timestamp()),
        }
    }

    /// Makes sure the dev user row exists so owned rows satisfy their foreign keys
    pub async fn ensure_dev_user(&self, pool: &SqlitePool) -> Result<(), DevUserError> {
        if !self.enabled {
            return Ok(());
        }

        let user = self.create_dev_user();

        let clash: Option<(String,)> =
            sqlx::query_as("SELECT id FROM users WHERE username = ? AND id != ?")
                .bind(&user.username)
                .bind(&user.id)
                .fetch_optional(pool)
                .await?;

        if let Some((owner_id,)) = clash {
            error!(
                username = %user.username,
                owner_id = %owner_id,
                "DEV_USERNAME collides with a registered account"
            );
            return Err(DevUserError::UsernameTaken(user.username));
        }
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET username = excluded.username
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.created_at)
        .execute(pool)
        .await?;

        info!(user_id = %user.id, username = %user.username, "Dev user ready");
        Ok(())
    }
}

/// Print dev mode status on startup
pub fn print_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        println!("⚠️  🔓 DEV MODE ENABLED 🔓 ⚠️");
        println!("   Authentication bypassed for testing");
        println!("   Dev User: {} ({})", config.username, DEV_USER_ID);
        println!(
            "   Admin: {}",
            if config.user_is_admin { "Yes" } else { "No" }
        );
        println!("   ⚠️  DO NOT USE IN PRODUCTION ⚠️");
        println!();
    } else {
        println!("🔒 Production mode - Authentication required");
    }
}

/// CLI argument parsing for dev mode
pub fn parse_dev_mode_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    let mut decision = None;
    for arg in args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => decision = Some(true),
            "--no-dev" | "--prod" | "--production" => decision = Some(false),
            _ => {}
        }
    }
    decision
}

/// Override dev mode from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args()) {
        println!("🔧 CLI override: DEV_MODE = {}", cli_dev_mode);
        config.enabled = cli_dev_mode;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cli_flags() {
        assert_eq!(parse_dev_mode_args(args(&["fittrack_api"])), None);
        assert_eq!(parse_dev_mode_args(args(&["fittrack_api", "--dev"])), Some(true));
        assert_eq!(parse_dev_mode_args(args(&["fittrack_api", "--prod"])), Some(false));
        // last flag wins
        assert_eq!(
            parse_dev_mode_args(args(&["fittrack_api", "--dev", "--no-dev"])),
            Some(false)
        );
    }

    #[test]
    fn test_dev_user_has_fixed_id() {
        let config = DevModeConfig::disabled();
        let user = config.create_dev_user();
        assert_eq!(user.id, DEV_USER_ID);
        assert_eq!(user.username, "dev");
    }

    #[tokio::test]
    async fn test_ensure_dev_user_skipped_when_disabled() {
        let pool = crate::common::test_utils::setup_test_db().await;
        DevModeConfig::disabled().ensure_dev_user(&pool).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_ensure_dev_user_is_idempotent() {
        let pool = crate::common::test_utils::setup_test_db().await;
        let mut config = DevModeConfig::disabled();
        config.enabled = true;

        config.ensure_dev_user(&pool).await.unwrap();
        config.ensure_dev_user(&pool).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(DEV_USER_ID)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_ensure_dev_user_rejects_registered_username() {
        let pool = crate::common::test_utils::setup_test_db().await;
        let registered = crate::common::test_utils::create_test_user(&pool, "dev").await;

        let mut config = DevModeConfig::disabled();
        config.enabled = true;

        let err = config.ensure_dev_user(&pool).await.unwrap_err();
        assert!(matches!(err, DevUserError::UsernameTaken(ref name) if name == "dev"));

        let owners: Vec<(String,)> = sqlx::query_as("SELECT id FROM users WHERE username = 'dev'")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(owners, vec![(registered,)]);
    }
}
