use actix_web::web;
use auth_core::{AppError, ErrorCode};

pub mod auth;
pub mod health;

/// Exact-match paths the token gate lets through without a token. Every
/// path this service serves is public; anything else still requires a
/// valid token, so a misrouted protected endpoint fails closed.
pub const ALLOWLIST: [&str; 3] = ["/health", "/signup", "/login"];

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    auth::configure_routes(cfg);
}

/// JSON extractor config mapping body parse failures onto the shared
/// problem+json error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    })
}
