//! Patient record operations.

use std::time::{SystemTime, UNIX_EPOCH};

use auth_core::{AppError, ErrorCode};
use sea_orm::ConnectionTrait;
use tracing::info;
use uuid::Uuid;

use crate::entities::patients;
use crate::repos::patients as repo;

pub async fn create_patient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    first_name: String,
    last_name: String,
    email: String,
) -> Result<patients::Model, AppError> {
    // Best-effort pre-check; the unique email index closes the remaining
    // race and the insert maps that to the same 409.
    if repo::exists_by_email(conn, &email).await? {
        return Err(AppError::conflict(
            ErrorCode::PatientAlreadyExists,
            "Patient with this email already registered".to_string(),
        ));
    }

    let patient = repo::insert_patient(conn, first_name, last_name, email, now_unix()).await?;
    info!(patient_id = %patient.patient_id, "patient created");
    Ok(patient)
}

pub async fn get_patient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    patient_id: Uuid,
) -> Result<patients::Model, AppError> {
    repo::find_by_id(conn, patient_id).await?.ok_or_else(|| {
        AppError::not_found(ErrorCode::PatientNotFound, "Patient not found".to_string())
    })
}

pub async fn list_patients<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<patients::Model>, AppError> {
    repo::find_all(conn).await
}

pub async fn update_patient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    patient_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
) -> Result<patients::Model, AppError> {
    let existing = get_patient(conn, patient_id).await?;
    let patient =
        repo::update_patient(conn, existing, first_name, last_name, email, now_unix()).await?;
    info!(patient_id = %patient.patient_id, "patient updated");
    Ok(patient)
}

pub async fn remove_patient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    patient_id: Uuid,
) -> Result<(), AppError> {
    let rows = repo::delete_by_id(conn, patient_id).await?;
    if rows == 0 {
        return Err(AppError::not_found(
            ErrorCode::PatientNotFound,
            "Patient not found".to_string(),
        ));
    }
    info!(%patient_id, "patient deleted");
    Ok(())
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
