use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use awesome_api_rust::config::AppConfig;
use awesome_api_rust::database::{DatabaseManager, PgTableSource, TableRegistry};
use awesome_api_rust::{app, AppState};

const STARTUP_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up credentials and database settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Missing credentials, signing key or database settings abort startup
    let config = AppConfig::from_env().context("failed to load configuration")?;

    let database = DatabaseManager::connect_lazy(&config.database);

    // Logged only; requests fail with 500 until the database is reachable
    match tokio::time::timeout(STARTUP_CHECK_TIMEOUT, database.health_check()).await {
        Ok(Ok(())) => tracing::info!("Database reachable"),
        Ok(Err(e)) => tracing::warn!("Database not reachable at startup: {}", e),
        Err(_) => tracing::warn!("Database did not answer within {:?}", STARTUP_CHECK_TIMEOUT),
    }

    let registry = Arc::new(TableRegistry::standard());
    let tables = Arc::new(PgTableSource::new(database.pool().clone(), registry));

    let state = AppState::from_config(&config, tables);
    tracing::info!(
        "Serving data for {} (tokens signed with {:?}, {} minute lifetime)",
        state.authenticator.credentials().username,
        state.authenticator.codec().algorithm(),
        config.security.access_token_expire_minutes
    );
    let app = app(state, config.server.enable_cors);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Awesome API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
