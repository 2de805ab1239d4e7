use actix_web::{web, HttpResponse};
use auth_core::AppError;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = match &app_state.db {
        Some(db) => match db.ping().await {
            Ok(()) => "ok",
            Err(_) => "error",
        },
        None => "unconfigured",
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "up",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
