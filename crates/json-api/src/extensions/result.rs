//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use tracing::error;

use crate::errors::ApiError;

/// Map any error to a logged internal server error.
pub(crate) trait ResultExt<T> {
    /// Log `context` with the error and hide the detail from the caller.
    fn or_500(self, context: &str) -> Result<T, ApiError>;

    /// Log `context` with the error and pass the detail on to the caller.
    fn or_500_with_details(self, context: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            ApiError::server_error()
        })
    }

    fn or_500_with_details(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            ApiError::server_error_with_details(error.to_string())
        })
    }
}
