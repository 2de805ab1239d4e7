//! Signup and login flows.

use std::time::{SystemTime, UNIX_EPOCH};

use auth_core::{issue_access_token, AppError, ErrorCode, Role, SecurityConfig};
use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::password::{hash_password, verify_password, DUMMY_PASSWORD_HASH};
use crate::repos::users::{self, NewUser};

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Register a new subject. The identifying fields (email, username) must
/// be unused; the password is stored only as an Argon2 hash.
pub async fn signup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: SignupInput,
) -> Result<(), AppError> {
    // Best-effort pre-check for a friendly error; the unique indexes close
    // the remaining race window and insert_user maps that to the same 409.
    if users::exists_by_email_or_username(conn, &input.email, &input.username).await? {
        return Err(AppError::conflict(
            ErrorCode::UserAlreadyExists,
            "Email or username already registered".to_string(),
        ));
    }

    let password_hash = hash_password(&input.password)?;

    let user = users::insert_user(
        conn,
        NewUser {
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            role: input.role.as_str().to_string(),
            password_hash,
        },
        now_unix(),
    )
    .await?;

    info!(user_id = %user.user_id, role = %user.role, "new user registered");
    Ok(())
}

/// Authenticate and issue an access token.
///
/// Unknown email and wrong password produce the identical error so the
/// response cannot be used to enumerate accounts; the two cases are only
/// distinguished in logs.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = match users::find_by_email(conn, email).await? {
        Some(user) => user,
        None => {
            // Burn the same hashing work as a real comparison so latency
            // does not reveal whether the account exists.
            let _ = verify_password(password, DUMMY_PASSWORD_HASH);
            warn!("login rejected: unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.user_id, "login rejected: password mismatch");
        return Err(AppError::invalid_credentials());
    }

    let role: Role = user.role.parse().map_err(|_| {
        AppError::internal(format!(
            "user {} carries unknown role '{}'",
            user.user_id, user.role
        ))
    })?;

    let token = issue_access_token(
        &user.user_id.to_string(),
        role,
        SystemTime::now(),
        security,
    )?;

    info!(user_id = %user.user_id, "login succeeded");
    Ok(token)
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
