use auth_core::{AppError, SecurityConfig};
use sea_orm::DatabaseConnection;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
        }
    }

    /// State without a database connection, for tests that never touch it.
    pub fn without_db(security: SecurityConfig) -> Self {
        Self { db: None, security }
    }
}

pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db
        .as_ref()
        .ok_or_else(|| AppError::db("database connection not available".to_string()))
}
