//! Variant queries
//!
//! - get: single-row SELECT by primary key
//! - create: INSERT ... RETURNING so the generated id comes back in one round trip

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::{DbError, PgStore, VariantStore};
use crate::models::NewVariant;

/// Variant record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Variant {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub percent: i32,
}

#[async_trait]
impl VariantStore for PgStore {
    async fn get_variant(&self, id: Uuid) -> Result<Variant, DbError> {
        let query = sqlx::query_as::<_, Variant>(
            r#"
            SELECT id, name, description, percent
            FROM "variant"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool);

        self.bounded(query)
            .await?
            .ok_or_else(|| DbError::not_found("variant", id))
    }

    async fn create_variant(&self, new: NewVariant) -> Result<Variant, DbError> {
        let query = sqlx::query_as::<_, Variant>(
            r#"
            INSERT INTO "variant" (name, description, percent)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, percent
            "#,
        )
        .bind(new.name)
        .bind(new.description)
        .bind(new.percent.get())
        .fetch_one(&self.pool);

        let variant = self.bounded(query).await?;
        tracing::debug!(variant_id = %variant.id, "variant created");
        Ok(variant)
    }
}
