use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Foreign key points at a missing row
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DatabaseError>;

impl DatabaseError {
    /// Classify constraint violations, keeping every other error as-is.
    pub fn from_constraint(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return DatabaseError::Conflict(format!("{} already exists", what));
            }
            if db_err.is_foreign_key_violation() {
                return DatabaseError::InvalidReference(format!("{} references a missing row", what));
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Opens the SQLite pool and keeps the schema current
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool for `config.url` and apply pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> DbResult<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // An in-memory database lives as long as its connection
        if Self::is_in_memory(&config.url) {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        info!("Database connection established: {}", Self::display_url(&config.url));

        Self::migrate(&pool).await?;
        Ok(pool)
    }

    pub async fn migrate(pool: &SqlitePool) -> DbResult<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn health_check(pool: &SqlitePool) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// Strip query parameters before logging
    fn display_url(url: &str) -> &str {
        url.split('?').next().unwrap_or(url)
    }
}
