use actix_web::web;
use auth_core::{AppError, ErrorCode};

pub mod health;
pub mod patients;

/// Exact-match paths the token gate lets through without a token. Only
/// the health check is public here; every patient operation requires a
/// verified token.
pub const ALLOWLIST: [&str; 1] = ["/health"];

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    patients::configure_routes(cfg);
}

/// JSON extractor config mapping body parse failures onto the shared
/// problem+json error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    })
}
