use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use sqlx::postgres::PgSslMode;

/// How an independent experience/skill create treats its `personalInfoId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentIdCheck {
    /// Insert straight away and let the foreign key (if any) reject bogus ids.
    #[default]
    TrustStore,
    /// Look the personal info row up first and answer 404 when it is missing.
    Validate,
}

impl FromStr for ParentIdCheck {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "store" | "trust-store" => Ok(ParentIdCheck::TrustStore),
            "validate" => Ok(ParentIdCheck::Validate),
            other => Err(anyhow!(
                "PARENT_ID_CHECK must be 'store' or 'validate', got '{other}'"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_ssl_mode: PgSslMode,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub parent_id_check: ParentIdCheck,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let database_url = std::env::var("DB_CONNECTION_STRING")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .context("Required environment variable 'DB_CONNECTION_STRING' (or 'DATABASE_URL') is not set")?;

        Ok(Config {
            database_url,
            database_ssl_mode: optional_env("DB_SSL_MODE", "require")
                .parse::<PgSslMode>()
                .context("DB_SSL_MODE must be a valid Postgres sslmode")?,
            database_max_connections: optional_env("DB_MAX_CONNECTIONS", "10")
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            parent_id_check: optional_env("PARENT_ID_CHECK", "store").parse()?,
        })
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
