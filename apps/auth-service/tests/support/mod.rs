use std::time::Duration;

use auth_core::SecurityConfig;
use auth_service::infra::db::ensure_schema;
use auth_service::state::AppState;
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
