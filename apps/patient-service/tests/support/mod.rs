use std::time::{Duration, SystemTime};

use auth_core::{issue_access_token, Role, SecurityConfig};
use patient_service::infra::db::ensure_schema;
use patient_service::state::AppState;
use sea_orm::{ConnectOptions, Database};

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(
        "test_secret_key_for_testing_purposes_only".as_bytes(),
        Duration::from_secs(3600),
    )
}

/// Fresh in-memory SQLite database per test; no cross-test state.
///
/// Pinned to a single pooled connection: an in-memory SQLite database is
/// per-connection, so a larger pool would hand out empty databases.
pub async fn test_state() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    ensure_schema(&db).await.expect("bootstrap test schema");
    AppState::new(db, test_security())
}

pub fn token_for(role: Role) -> String {
    issue_access_token("u1", role, SystemTime::now(), &test_security())
        .expect("issue test token")
}

pub fn expired_token(role: Role) -> String {
    let issued_at = SystemTime::now() - Duration::from_secs(2 * 3600);
    issue_access_token("u1", role, issued_at, &test_security()).expect("issue test token")
}
