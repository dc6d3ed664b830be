//! Database error type shared by every store

use sqlx::error::ErrorKind;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Row rejected by a table constraint (foreign key, NOT NULL, CHECK, UNIQUE)
    #[error("constraint violation: {message}")]
    Constraint { message: String },

    /// Value the datastore can't store as given (SQLSTATE class 22)
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("query timed out after {seconds} seconds")]
    Timeout { seconds: u64 },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// SQLSTATE class 22 ("data exception"): bad values, not a broken datastore.
fn is_data_exception(code: Option<&str>) -> bool {
    code.is_some_and(|code| code.starts_with("22"))
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
                | ErrorKind::UniqueViolation => {
                    return Self::Constraint {
                        message: db.message().to_owned(),
                    };
                }
                _ if is_data_exception(db.code().as_deref()) => {
                    return Self::InvalidInput {
                        message: db.message().to_owned(),
                    };
                }
                _ => {}
            }
        }
        Self::Sqlx(e)
    }
}
