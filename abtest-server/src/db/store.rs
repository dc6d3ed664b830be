//! Store traits and the PostgreSQL-backed store
//!
//! Handlers only see `dyn Store`, so the same router runs against
//! [`PgStore`] in production and [`MemoryStore`](super::MemoryStore) in tests.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repos::{User, UserWithVariant, Variant};
use super::DbError;
use crate::models::{NewUser, NewVariant};

/// Default deadline for a single datastore round trip.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Variant reads and writes
#[async_trait]
pub trait VariantStore: Send + Sync {
    /// Fetch a variant by id.
    async fn get_variant(&self, id: Uuid) -> Result<Variant, DbError>;

    /// Insert a variant and return it with its generated id.
    async fn create_variant(&self, new: NewVariant) -> Result<Variant, DbError>;
}

/// User reads and writes
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user together with its assigned variant.
    async fn get_user(&self, id: Uuid) -> Result<UserWithVariant, DbError>;

    /// Insert a user. Fails with [`DbError::Constraint`] if `variant_id`
    /// doesn't reference an existing variant.
    async fn create_user(&self, new: NewUser) -> Result<User, DbError>;
}

/// Everything the HTTP layer needs from storage
pub trait Store: VariantStore + UserStore {}

impl<T> Store for T where T: VariantStore + UserStore {}

/// PostgreSQL store
///
/// Cloning is cheap: the pool is reference-counted internally.
#[derive(Debug, Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
    query_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_timeout(pool, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_timeout(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Run one round trip under the per-request deadline.
    pub(crate) async fn bounded<T, F>(&self, query: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(DbError::from),
            Err(_) => {
                tracing::warn!(timeout = ?self.query_timeout, "query deadline exceeded");
                Err(DbError::Timeout {
                    seconds: self.query_timeout.as_secs(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_store(timeout: Duration) -> PgStore {
        // connect_lazy never touches the network until a query runs
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/abtest")
            .expect("valid url");
        PgStore::with_timeout(pool, timeout)
    }

    #[tokio::test]
    async fn bounded_passes_through_result() {
        let store = lazy_store(Duration::from_secs(1));
        let value = store.bounded(async { Ok::<_, sqlx::Error>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_reports_timeout() {
        let store = lazy_store(Duration::from_secs(2));
        let err = store
            .bounded(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, sqlx::Error>(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Timeout { seconds: 2 }));
    }
}
