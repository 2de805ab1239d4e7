use std::env;
use std::time::Duration;

use auth_core::AppError;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address, e.g. `0.0.0.0:8081`
    pub http_addr: String,
    pub database_url: String,
    /// Shared signing secret; must match the patient service
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let http_addr =
            env::var("AUTH_HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8081".to_string());
        let database_url = must_var("DATABASE_URL")?;
        let jwt_secret = must_var("JWT_SECRET")?;

        let token_ttl = match env::var("TOKEN_TTL_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    AppError::config(format!("TOKEN_TTL_SECS must be a number of seconds, got '{raw}'"))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => auth_core::security::DEFAULT_TOKEN_TTL,
        };

        Ok(Self {
            http_addr,
            database_url,
            jwt_secret,
            token_ttl,
        })
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::config(format!("{name} must be set")))
}
