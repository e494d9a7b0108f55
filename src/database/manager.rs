use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the table-access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("{0} table has no registered record shape")]
    Unmapped(String),

    #[error("Failed to serialize row: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool for the configured PostgreSQL database.
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Build the pool without opening a connection. Connections are
    /// established on first use, so startup never waits on the database.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(Self::connect_options(config));

        info!(
            "Created database pool for {}@{}:{}/{}",
            config.username, config.hostname, config.port, config.dbname
        );
        Self { pool }
    }

    fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&config.hostname)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.dbname)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Pings the database to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    /// Quote SQL identifier to prevent injection
    pub(crate) fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
