//! In-process store
//!
//! Mirrors the PostgreSQL tables closely enough to drive the HTTP layer
//! without a database: ids are generated on insert and the
//! `"user".variant_id` foreign key is enforced.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repos::{User, UserWithVariant, Variant};
use super::{DbError, UserStore, VariantStore};
use crate::models::{NewUser, NewVariant};

#[derive(Debug, Default)]
struct Tables {
    variants: HashMap<Uuid, Variant>,
    users: HashMap<Uuid, User>,
}

/// Store backed by in-memory tables
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted (variants, users).
    pub async fn counts(&self) -> (usize, usize) {
        let tables = self.tables.read().await;
        (tables.variants.len(), tables.users.len())
    }
}

#[async_trait]
impl VariantStore for MemoryStore {
    async fn get_variant(&self, id: Uuid) -> Result<Variant, DbError> {
        self.tables
            .read()
            .await
            .variants
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("variant", id))
    }

    async fn create_variant(&self, new: NewVariant) -> Result<Variant, DbError> {
        let variant = Variant {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            percent: new.percent.get(),
        };
        self.tables
            .write()
            .await
            .variants
            .insert(variant.id, variant.clone());
        Ok(variant)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: Uuid) -> Result<UserWithVariant, DbError> {
        let tables = self.tables.read().await;
        let user = tables
            .users
            .get(&id)
            .ok_or_else(|| DbError::not_found("user", id))?;

        Ok(UserWithVariant {
            id: user.id,
            user_id: user.user_id.clone(),
            variant_id: user.variant_id,
            variant: tables.variants.get(&user.variant_id).cloned(),
        })
    }

    async fn create_user(&self, new: NewUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.variants.contains_key(&new.variant_id) {
            return Err(DbError::Constraint {
                message: format!(
                    "insert on table \"user\" violates foreign key constraint: \
                     variant '{}' does not exist",
                    new.variant_id
                ),
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            variant_id: new.variant_id,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}
