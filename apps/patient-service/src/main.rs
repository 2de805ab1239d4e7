use actix_web::{web, App, HttpServer};
use auth_core::{SecurityConfig, TokenGate};
use patient_service::config::Config;
use patient_service::infra::db::{connect_db, ensure_schema};
use patient_service::routes;
use patient_service::state::AppState;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    auth_core::telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let db = match connect_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("failed to connect to database: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = ensure_schema(&db).await {
        eprintln!("failed to bootstrap schema: {e}");
        std::process::exit(1);
    }

    // Verification-only: the TTL setting is unused on this side, but the
    // secret must match the auth service's.
    let security = SecurityConfig::new(
        config.jwt_secret.as_bytes(),
        auth_core::security::DEFAULT_TOKEN_TTL,
    );
    let data = web::Data::new(AppState::new(db, security.clone()));

    info!(addr = %config.http_addr, "starting patient service");

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(routes::json_config())
            .wrap(TokenGate::new(security.clone(), routes::ALLOWLIST))
            .configure(routes::configure)
    })
    .bind(config.http_addr.as_str())?
    .run()
    .await
}
