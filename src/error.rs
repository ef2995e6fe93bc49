//! Defines the app level error type and its conversion to JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::message_response;

/// The errors that may occur in the application.
///
/// Expected outcomes of a request, such as invalid input or an unknown
/// transaction ID, are answered directly by the handlers. This type covers the
/// failures that the client cannot fix by changing the request.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error occurs when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("An unexpected error occurred: {}", self);

        message_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}
