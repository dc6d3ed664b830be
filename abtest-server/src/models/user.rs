//! User assignment input

use uuid::Uuid;

use super::{check_text, ValidationError};

/// A user assignment ready to be inserted
///
/// `variant_id` is not checked for existence here; the foreign key on
/// `"user".variant_id` is the single source of truth for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: Option<String>,
    pub variant_id: Uuid,
}

impl NewUser {
    pub fn new(user_id: Option<String>, variant_id: Option<Uuid>) -> Result<Self, ValidationError> {
        let variant_id = variant_id.ok_or(ValidationError::Missing {
            field: "variant_id",
        })?;
        if let Some(user_id) = &user_id {
            check_text("user_id", user_id)?;
        }
        Ok(Self {
            user_id,
            variant_id,
        })
    }
}
