//! abtest-server: HTTP API over A/B test variants and user assignments
//!
//! Layers:
//! - [`models`]: request-side domain types, validated at construction
//! - [`db`]: connection pool, schema bootstrap, and the store traits with
//!   PostgreSQL and in-memory implementations
//! - [`http`]: axum router, handlers, extractors, and error mapping

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, MemoryStore, PgStore, Store};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
