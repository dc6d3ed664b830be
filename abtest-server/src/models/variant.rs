//! Variant input validation
//!
//! `percent` is a per-variant rollout weight in `0..=100`. Nothing ties the
//! weights of different variants together.

use super::{check_text, ValidationError};

/// Lowest accepted rollout weight
pub const MIN_PERCENT: i32 = 0;

/// Highest accepted rollout weight
pub const MAX_PERCENT: i32 = 100;

/// Validated rollout weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Percent(i32);

impl Percent {
    /// Create a rollout weight, rejecting values outside `0..=100`.
    ///
    /// # Example
    /// ```
    /// use abtest_server::models::Percent;
    ///
    /// assert!(Percent::new(50).is_ok());
    /// assert!(Percent::new(101).is_err());
    /// ```
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(MIN_PERCENT..=MAX_PERCENT).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: "percent",
                min: MIN_PERCENT,
                max: MAX_PERCENT,
                value,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// A variant ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariant {
    pub name: String,
    pub description: Option<String>,
    pub percent: Percent,
}

impl NewVariant {
    /// Build from the optional fields of a request body.
    ///
    /// `name` and `percent` are required. `name` is stored as given; an empty
    /// label is accepted, matching the `NOT NULL` column it lands in. Text
    /// containing NUL is rejected since no `TEXT` column can hold it.
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        percent: Option<i32>,
    ) -> Result<Self, ValidationError> {
        let name = name.ok_or(ValidationError::Missing { field: "name" })?;
        let percent = percent.ok_or(ValidationError::Missing { field: "percent" })?;

        check_text("name", &name)?;
        if let Some(description) = &description {
            check_text("description", description)?;
        }

        Ok(Self {
            name,
            description,
            percent: Percent::new(percent)?,
        })
    }
}
