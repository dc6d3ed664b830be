//! Database layer - connection pool, schema, and stores
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - One round trip per request, bounded by a query deadline
//! - Rely on DB constraints, classify violations - no check-then-insert

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use error::DbError;
pub use memory::MemoryStore;
pub use pool::{PoolSettings, DEFAULT_MAX_CONNECTIONS};
pub use repos::{User, UserWithVariant, Variant};
pub use sqlx::PgPool;
pub use store::{PgStore, Store, UserStore, VariantStore, DEFAULT_QUERY_TIMEOUT};
