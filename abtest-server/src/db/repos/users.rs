//! User queries
//!
//! - get: LEFT JOIN against variant so the assignment is hydrated in one query
//! - create: INSERT ... RETURNING; the foreign key rejects unknown variants

use async_trait::async_trait;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use super::Variant;
use crate::db::{DbError, PgStore, UserStore};
use crate::models::NewUser;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub variant_id: Uuid,
}

/// User with its assigned variant.
///
/// `variant` is `None` only if the join found no row, which the foreign
/// key rules out for data written through this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithVariant {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub variant_id: Uuid,
    pub variant: Option<Variant>,
}

#[async_trait]
impl UserStore for PgStore {
    async fn get_user(&self, id: Uuid) -> Result<UserWithVariant, DbError> {
        let query = sqlx::query(
            r#"
            SELECT
                u.id,
                u.user_id,
                u.variant_id,
                v.id AS joined_variant_id,
                v.name AS variant_name,
                v.description AS variant_description,
                v.percent AS variant_percent
            FROM "user" u
            LEFT JOIN "variant" v ON u.variant_id = v.id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool);

        let row = self
            .bounded(query)
            .await?
            .ok_or_else(|| DbError::not_found("user", id))?;

        let joined_id: Option<Uuid> = row.try_get("joined_variant_id")?;
        let variant = match joined_id {
            Some(variant_id) => Some(Variant {
                id: variant_id,
                name: row.try_get("variant_name")?,
                description: row.try_get("variant_description")?,
                percent: row.try_get("variant_percent")?,
            }),
            None => None,
        };

        Ok(UserWithVariant {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            variant_id: row.try_get("variant_id")?,
            variant,
        })
    }

    async fn create_user(&self, new: NewUser) -> Result<User, DbError> {
        let query = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (user_id, variant_id)
            VALUES ($1, $2)
            RETURNING id, user_id, variant_id
            "#,
        )
        .bind(new.user_id)
        .bind(new.variant_id)
        .fetch_one(&self.pool);

        let user = self.bounded(query).await?;
        tracing::debug!(user = %user.id, variant_id = %user.variant_id, "user assigned");
        Ok(user)
    }
}
