use anyhow::Context;
use tracing_subscriber::EnvFilter;

use caravane_api::config::AppConfig;
use caravane_api::database::DatabaseManager;
use caravane_api::router;
use caravane_api::services::ensure_super_admin;
use caravane_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();
    init_tracing(config.api.enable_request_logging);
    tracing::info!("Starting Caravane API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET_KEY is not set; refusing to start");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;

    if let Some(seed) = &config.security.superadmin {
        ensure_super_admin(&pool, seed)
            .await
            .context("failed to bootstrap super admin")?;
    }

    let state = AppState::new(pool.clone(), &config)?;
    let app = router::app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Caravane API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(request_logging: bool) {
    let default = if request_logging {
        "caravane_api=info,tower_http=info"
    } else {
        "caravane_api=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
