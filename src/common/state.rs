// Application state shared across all modules

use sqlx::SqlitePool;

use crate::common::config::AppConfig;
use crate::common::dev_mode::DevModeConfig;

/// Application state containing the database pool and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: AppConfig,
    pub dev_mode: DevModeConfig,
}
