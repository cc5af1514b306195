//! Gatehouse binary entry point

use gatehouse::{AppState, config};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber from `[logging]`.
///
/// `RUST_LOG` still wins over `logging.level` when set.
fn init_tracing(logging: &config::LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.default_filter().into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration comes first: it decides how we log.
    let config = config::AppConfig::load()?;
    init_tracing(&config.logging);

    tracing::info!(
        domain = %config.server.domain,
        protocol = %config.server.protocol,
        log_level = %config.logging.level,
        log_format = %config.logging.format,
        "Starting Gatehouse"
    );
    if !config.should_use_secure_cookies() {
        tracing::warn!(
            domain = %config.server.domain,
            "Using insecure session cookies for local development"
        );
    }

    gatehouse::metrics::init_metrics();

    let state = AppState::new(config.clone())?;
    let app = gatehouse::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, public_url = %config.server.base_url(), "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}
