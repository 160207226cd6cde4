// src/common/config.rs
//! Environment-driven application configuration

use std::collections::HashSet;
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://fittrack.db";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Short-lived access token, one-day refresh token
const DEFAULT_ACCESS_TTL_MINUTES: i64 = 5;
const DEFAULT_REFRESH_TTL_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub admin_usernames: HashSet<String>,
    pub cors_origins: Vec<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "replace_with_strong_secret".to_string());

        let jwt = JwtConfig {
            secret,
            access_ttl_minutes: parse_minutes("ACCESS_TOKEN_TTL_MINUTES", DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl_minutes: parse_minutes(
                "REFRESH_TOKEN_TTL_MINUTES",
                DEFAULT_REFRESH_TTL_MINUTES,
            ),
        };

        let admin_usernames = parse_list(&env::var("ADMIN_USERNAMES").unwrap_or_default())
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect();

        let cors_origins = parse_list(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            database_url,
            jwt,
            admin_usernames,
            cors_origins,
            port,
        }
    }

    pub fn is_admin(&self, username: &str) -> bool {
        self.admin_usernames.contains(&username.to_lowercase())
    }
}

fn parse_minutes(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Splits a comma-separated env value, dropping blanks
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
impl AppConfig {
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt: JwtConfig {
                secret: "test_secret_key".to_string(),
                access_ttl_minutes: DEFAULT_ACCESS_TTL_MINUTES,
                refresh_ttl_minutes: DEFAULT_REFRESH_TTL_MINUTES,
            },
            admin_usernames: ["coach".to_string()].into_iter().collect(),
            cors_origins: Vec::new(),
            port: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_skips_blanks() {
        let parsed = parse_list(" alice , ,bob,");
        assert_eq!(parsed, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_admin_lookup_is_case_insensitive() {
        let config = AppConfig::for_tests();
        assert!(config.is_admin("Coach"));
        assert!(!config.is_admin("athlete"));
    }
}
