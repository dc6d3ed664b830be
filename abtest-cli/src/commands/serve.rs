//! HTTP server command
//!
//! Runs the variant/user API against PostgreSQL, or against the in-memory
//! store with `--in-memory`.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use abtest_server::db::migrations;
use abtest_server::{run_server, AppState, MemoryStore, ServerConfig};

use super::database::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ABTEST_BIND", default_value = "127.0.0.1:8081")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Create missing tables before accepting requests
    #[arg(long)]
    pub migrate: bool,

    /// Serve from process memory instead of PostgreSQL (data is lost on exit)
    #[arg(long, conflicts_with = "migrate")]
    pub in_memory: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    if args.in_memory {
        tracing::warn!("Serving from in-memory store; nothing will be persisted");
        return run_server(AppState::new(MemoryStore::new()), config)
            .await
            .context("Server error");
    }

    let pool = args.db.connect().await?;

    if args.migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run schema migrations")?;
    }

    let store = args.db.settings().store(pool.clone());
    tracing::info!(
        bind = %args.bind,
        query_timeout_secs = args.db.query_timeout_secs,
        "Starting abtest server"
    );

    // Blocks until shutdown
    let served = run_server(AppState::new(store), config).await;

    pool.close().await;
    tracing::info!("Database pool closed");

    served.context("Server error")
}
