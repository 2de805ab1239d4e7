//! User repository functions (generic over ConnectionTrait).

use auth_core::AppError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::users;
use crate::infra::db::map_db_err;

/// Fields needed to persist a new subject.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, AppError> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub async fn exists_by_email_or_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    username: &str,
) -> Result<bool, AppError> {
    let count = users::Entity::find()
        .filter(
            Condition::any()
                .add(users::Column::Email.eq(email))
                .add(users::Column::Username.eq(username)),
        )
        .count(conn)
        .await
        .map_err(map_db_err)?;
    Ok(count > 0)
}

/// Insert a new user. A unique violation on email or username surfaces as
/// a conflict via `map_db_err`.
pub async fn insert_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
    now: i64,
) -> Result<users::Model, AppError> {
    let user_active = users::ActiveModel {
        user_id: Set(Uuid::new_v4()),
        username: Set(new_user.username),
        first_name: Set(new_user.first_name),
        last_name: Set(new_user.last_name),
        email: Set(new_user.email),
        role: Set(new_user.role),
        password_hash: Set(new_user.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await.map_err(map_db_err)
}
