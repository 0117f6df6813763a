use crate::config::DatabaseConfig;
use crate::error::{AppError, Result};
use sqlx::{any::AnyPoolOptions, AnyPool};
use std::time::Duration;
use tracing::{error, info};

/// Builds a pool that connects on first use.
///
/// Both PostgreSQL (`postgres://`) and SQLite (`sqlite://`) URLs are
/// accepted. Only the URL is checked here; an unreachable server shows up
/// later as a storage error on the request that needed it.
pub fn get_database_pool(config: &DatabaseConfig) -> Result<AnyPool> {
    sqlx::any::install_default_drivers();

    info!(
        max_connections = config.max_connections,
        "Preparing database connection pool"
    );

    AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(0)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(Duration::from_secs(300))
        .test_before_acquire(true)
        .connect_lazy(&config.url)
        .map_err(|e| {
            error!("Invalid database URL: {}", e);
            AppError::Configuration(format!("Invalid DATABASE_URL: {}", e))
        })
}
