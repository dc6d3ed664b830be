//! Domain models with validation at construction
//!
//! All request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod user;
pub mod validation;
pub mod variant;

pub use user::NewUser;
pub use validation::{check_text, ValidationError};
pub use variant::{NewVariant, Percent};
