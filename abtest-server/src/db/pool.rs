//! Pool settings tied to the per-request deadline
//!
//! Waiting for a free connection is part of the same round trip the query
//! deadline bounds, so checkout uses that deadline as its `acquire_timeout`.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{PgStore, DEFAULT_QUERY_TIMEOUT};

/// Default maximum connections for the pool.
/// Kept low for a single small service.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection limits and the deadline shared by pool and store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub query_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

impl PoolSettings {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.query_timeout)
    }

    /// Open a pool against `database_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the first connection can't be established.
    pub async fn connect(&self, database_url: &str) -> Result<PgPool, sqlx::Error> {
        self.options().connect(database_url).await
    }

    /// Wrap `pool` in a store that bounds each query by the same deadline.
    pub fn store(&self, pool: PgPool) -> PgStore {
        PgStore::with_timeout(pool, self.query_timeout)
    }
}
