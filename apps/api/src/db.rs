use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!(
        "Connecting to PostgreSQL (max_connections={}, sslmode={:?})...",
        config.database_max_connections, config.database_ssl_mode
    );

    let options = PgConnectOptions::from_str(&config.database_url)
        .context("Invalid database connection string")?
        .ssl_mode(config.database_ssl_mode);

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
