use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging. Called once from each service main.
///
/// Emits JSON for log collection by default; set `LOG_FORMAT=compact` for
/// human-readable local output. The default filter quiets the SQL layers
/// unless overridden with `RUST_LOG`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info,sqlx=warn,sea_orm=warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let fmt_layer = fmt::layer().with_target(false).with_ansi(false);

    if matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("compact")) {
        registry.with(fmt_layer.compact()).init();
    } else {
        registry.with(fmt_layer.json()).init();
    }
}
