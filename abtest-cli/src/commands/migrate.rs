//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use abtest_server::db::migrations;

use super::database::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create the pgcrypto extension and the variant/user tables if missing
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.db.connect().await?;

    migrations::run(&pool)
        .await
        .context("Failed to run schema migrations")?;

    pool.close().await;
    Ok(())
}
