//! Patient repository functions (generic over ConnectionTrait).

use auth_core::AppError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::patients;
use crate::infra::db::map_db_err;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    patient_id: Uuid,
) -> Result<Option<patients::Model>, AppError> {
    patients::Entity::find_by_id(patient_id)
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<patients::Model>, AppError> {
    patients::Entity::find().all(conn).await.map_err(map_db_err)
}

pub async fn exists_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<bool, AppError> {
    let count = patients::Entity::find()
        .filter(patients::Column::Email.eq(email))
        .count(conn)
        .await
        .map_err(map_db_err)?;
    Ok(count > 0)
}

/// Insert a new patient. A unique violation on email surfaces as a
/// conflict via `map_db_err`.
pub async fn insert_patient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    first_name: String,
    last_name: String,
    email: String,
    now: i64,
) -> Result<patients::Model, AppError> {
    let patient_active = patients::ActiveModel {
        patient_id: Set(Uuid::new_v4()),
        first_name: Set(first_name),
        last_name: Set(last_name),
        email: Set(email),
        created_at: Set(now),
        updated_at: Set(now),
    };

    patient_active.insert(conn).await.map_err(map_db_err)
}

pub async fn update_patient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: patients::Model,
    first_name: String,
    last_name: String,
    email: String,
    now: i64,
) -> Result<patients::Model, AppError> {
    let mut patient_active: patients::ActiveModel = existing.into();
    patient_active.first_name = Set(first_name);
    patient_active.last_name = Set(last_name);
    patient_active.email = Set(email);
    patient_active.updated_at = Set(now);

    patient_active.update(conn).await.map_err(map_db_err)
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    patient_id: Uuid,
) -> Result<u64, AppError> {
    let result = patients::Entity::delete_by_id(patient_id)
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    Ok(result.rows_affected)
}
