//! PostgreSQL implementations of the store traits
//!
//! Each handler maps to exactly one statement here:
//! - single-row lookups use `fetch_optional` and map `None` to NotFound
//! - inserts use `RETURNING` and rely on table constraints, no check-then-insert

pub mod users;
pub mod variants;

pub use users::{User, UserWithVariant};
pub use variants::Variant;
