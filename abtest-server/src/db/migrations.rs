//! Schema bootstrap for the variant and user tables
//!
//! Every statement is idempotent, so this is safe to run on each start.

use sqlx::PgPool;

/// Create the pgcrypto extension and both tables if they don't exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    // gen_random_uuid() lives in pgcrypto on PostgreSQL < 13
    sqlx::query("CREATE EXTENSION IF NOT EXISTS pgcrypto")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "variant" (
            id UUID NOT NULL DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            description TEXT,
            percent INT NOT NULL,
            PRIMARY KEY (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "user" (
            id UUID NOT NULL DEFAULT gen_random_uuid(),
            user_id TEXT,
            variant_id UUID NOT NULL,
            PRIMARY KEY (id),
            FOREIGN KEY (variant_id) REFERENCES "variant"(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}
