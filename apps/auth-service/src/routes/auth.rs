use actix_web::{web, HttpResponse};
use auth_core::{AppError, ErrorCode, Role};
use serde::{Deserialize, Serialize};

use crate::services::users::{self, SignupInput};
use crate::state::{require_db, AppState};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn signup(
    req: web::Json<SignupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    require_non_empty("username", &req.username)?;
    require_non_empty("first_name", &req.first_name)?;
    require_non_empty("last_name", &req.last_name)?;
    require_non_empty("email", &req.email)?;
    require_non_empty("password", &req.password)?;

    let db = require_db(&app_state)?;
    users::signup(
        db,
        SignupInput {
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            role: req.role,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "User created successfully",
    }))
}

async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_non_empty("email", &req.email)?;
    require_non_empty("password", &req.password)?;

    let db = require_db(&app_state)?;
    let token = users::login(db, &app_state.security, &req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            format!("{field} cannot be empty"),
        ));
    }
    Ok(())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup));
    cfg.route("/login", web::post().to(login));
}
