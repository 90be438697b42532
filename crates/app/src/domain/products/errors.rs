//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// A unique constraint rejected the write.
    #[error("product already exists")]
    AlreadyExists,

    /// A required column was null.
    #[error("missing required data")]
    MissingRequiredData,

    /// A field failed its constraint.
    #[error("invalid product data: {0}")]
    InvalidData(&'static str),

    /// The embedded sample catalog is malformed.
    #[error("sample catalog could not be parsed: {0}")]
    Catalog(#[from] serde_norway::Error),

    /// Any other storage failure.
    #[error("storage error: {0}")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => {
                Self::InvalidData("rejected by a store constraint")
            }
            _ => Self::Sql(error),
        }
    }
}
