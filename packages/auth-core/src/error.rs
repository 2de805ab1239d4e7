//! Error taxonomy shared by both services.
//!
//! Every failure is recovered at the gate/handler boundary and turned into
//! an `application/problem+json` response; none propagates as an unhandled
//! fault. Server-side failures are logged with detail and surfaced to the
//! client as a generic message.

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::jwt::TokenError;

/// Canonical error codes appearing in HTTP responses.
///
/// Add new codes here; never pass ad-hoc strings as error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required or token rejected
    Unauthorized,
    /// Authenticated but role not permitted for this operation
    Forbidden,
    /// Unknown identifier or wrong password (deliberately indistinct)
    InvalidCredentials,

    // Request Validation
    /// General bad request error
    BadRequest,
    /// A required field is missing or empty
    ValidationError,

    // Resource Not Found
    /// Patient not found
    PatientNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Email or username already registered
    UserAlreadyExists,
    /// Patient with this email already registered
    PatientAlreadyExists,

    // System Errors
    /// Database error
    DbError,
    /// Configuration error
    ConfigError,
    /// Internal server error
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::PatientNotFound => "PATIENT_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::UserAlreadyExists => "USER_ALREADY_EXISTS",
            ErrorCode::PatientAlreadyExists => "PATIENT_ALREADY_EXISTS",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::InternalError => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Forbidden")]
    Forbidden,
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest { code, .. } => *code,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::Forbidden => ErrorCode::Forbidden,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Client-facing detail. Server-side failures get a generic message;
    /// their real detail only goes to the logs.
    fn client_detail(&self) -> String {
        match self {
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Forbidden => "Insufficient permissions".to_string(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Db { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn bad_request(code: ErrorCode, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    pub fn not_found(code: ErrorCode, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn conflict(code: ErrorCode, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<TokenError> for AppError {
    /// All verification failures fold into the same unauthenticated
    /// response; the caller logs the specific kind before converting.
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Encode(detail) => AppError::internal(detail),
            TokenError::Malformed | TokenError::InvalidSignature | TokenError::Expired => {
                AppError::unauthorized()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "request failed with server error");
        }

        let code = self.code().to_string();
        let problem_details = ProblemDetails {
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail: self.client_detail(),
            code,
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::invalid_credentials().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::conflict(ErrorCode::UserAlreadyExists, "taken".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::db("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_do_not_leak_detail() {
        let err = AppError::db("connection refused to db host 10.0.0.3".into());
        assert_eq!(err.client_detail(), "Internal server error");
    }

    #[test]
    fn test_token_errors_fold_into_unauthorized() {
        for e in [
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
        ] {
            assert!(matches!(AppError::from(e), AppError::Unauthorized));
        }
    }

    #[test]
    fn test_humanize_code() {
        assert_eq!(AppError::humanize_code("USER_ALREADY_EXISTS"), "User Already Exists");
        assert_eq!(AppError::humanize_code("UNAUTHORIZED"), "Unauthorized");
    }
}
