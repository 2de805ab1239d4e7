//! Database connection, schema bootstrap, and DbErr translation.

use auth_core::{AppError, ErrorCode};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Idempotent DDL run at startup. The unique email index is the
/// store-level uniqueness guard behind the best-effort existence check.
const SCHEMA_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS patients (
        patient_id uuid PRIMARY KEY,
        first_name text NOT NULL,
        last_name text NOT NULL,
        email text NOT NULL,
        created_at bigint NOT NULL,
        updated_at bigint NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS patients_email_key ON patients (email)",
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
pub fn map_db_err(e: DbErr) -> AppError {
    let msg = e.to_string();

    if msg.contains("patients_email_key") || msg.contains("UNIQUE constraint failed: patients.email")
    {
        return AppError::conflict(
            ErrorCode::PatientAlreadyExists,
            "Patient with this email already registered".to_string(),
        );
    }

    match e {
        DbErr::RecordNotFound(_) => AppError::not_found(
            ErrorCode::PatientNotFound,
            "Patient not found".to_string(),
        ),
        _ => AppError::db(msg),
    }
}
