//! Database connection, schema bootstrap, and DbErr translation.

use auth_core::{AppError, ErrorCode};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Idempotent DDL run at startup. The unique indexes are the store-level
/// uniqueness guard: the signup existence pre-check is best-effort only,
/// and a concurrent insert loses here with a conflict instead of creating
/// a duplicate.
const SCHEMA_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        user_id uuid PRIMARY KEY,
        username text NOT NULL,
        first_name text NOT NULL,
        last_name text NOT NULL,
        email text NOT NULL,
        role text NOT NULL,
        password_hash text NOT NULL,
        created_at bigint NOT NULL,
        updated_at bigint NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email)",
    "CREATE UNIQUE INDEX IF NOT EXISTS users_username_key ON users (username)",
];

pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|e| AppError::db(format!("failed to connect to database: {e}")))?;
    info!("database connected");
    Ok(db)
}

pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), AppError> {
    for statement in SCHEMA_DDL {
        db.execute_unprepared(statement)
            .await
            .map_err(|e| AppError::db(format!("schema bootstrap failed: {e}")))?;
    }
    Ok(())
}

/// Translate a `DbErr` into an `AppError` without leaking driver detail.
///
/// Unique violations on the users table become a credential conflict so
/// that a signup losing the check-then-insert race still reports 409.
pub fn map_db_err(e: DbErr) -> AppError {
    let msg = e.to_string();

    if is_users_unique_violation(&msg) {
        return AppError::conflict(
            ErrorCode::UserAlreadyExists,
            "Email or username already registered".to_string(),
        );
    }

    match e {
        DbErr::RecordNotFound(_) => {
            AppError::not_found(ErrorCode::NotFound, "Record not found".to_string())
        }
        _ => AppError::db(msg),
    }
}

fn is_users_unique_violation(msg: &str) -> bool {
    // Postgres names the violated constraint; SQLite (used in tests)
    // reports table.column.
    msg.contains("users_email_key")
        || msg.contains("users_username_key")
        || msg.contains("UNIQUE constraint failed: users.email")
        || msg.contains("UNIQUE constraint failed: users.username")
}

#[cfg(test)]
mod tests {
    use super::is_users_unique_violation;

    #[test]
    fn test_unique_violation_detection() {
        assert!(is_users_unique_violation(
            "error returned from database: duplicate key value violates unique constraint \"users_email_key\""
        ));
        assert!(is_users_unique_violation(
            "UNIQUE constraint failed: users.username"
        ));
        assert!(!is_users_unique_violation("connection refused"));
    }
}
