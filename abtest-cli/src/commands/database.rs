//! Database connection arguments shared by every command that needs Postgres

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use abtest_server::db::{PgPool, PoolSettings, DEFAULT_MAX_CONNECTIONS, DEFAULT_QUERY_TIMEOUT};

/// Connection settings
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string (also read from DATABASE_URL or .env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(
        long,
        env = "ABTEST_MAX_CONNECTIONS",
        default_value_t = DEFAULT_MAX_CONNECTIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_connections: u32,

    /// Deadline in seconds for each datastore round trip, checkout included
    #[arg(
        long,
        env = "ABTEST_QUERY_TIMEOUT_SECS",
        default_value_t = DEFAULT_QUERY_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub query_timeout_secs: u64,
}

impl DatabaseArgs {
    pub fn settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            query_timeout: Duration::from_secs(self.query_timeout_secs),
        }
    }

    /// Open the pool, failing with a hint when no URL was configured.
    pub async fn connect(&self) -> Result<PgPool> {
        let database_url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        let settings = self.settings();
        tracing::debug!(
            max_connections = settings.max_connections,
            query_timeout_secs = self.query_timeout_secs,
            "Connecting to database"
        );
        settings
            .connect(database_url)
            .await
            .context("Failed to create database pool")
    }
}
