use std::env;

use auth_core::AppError;

/// Runtime configuration, read once from the environment at startup.
///
/// This service only verifies tokens, so it carries no token lifetime; the
/// secret must be identical to the auth service's or verification fails
/// closed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address, e.g. `0.0.0.0:8082`
    pub http_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            http_addr: env::var("PATIENT_HTTP_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8082".to_string()),
            database_url: must_var("DATABASE_URL")?,
            jwt_secret: must_var("JWT_SECRET")?,
        })
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::config(format!("{name} must be set")))
}
