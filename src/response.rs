//! Helpers for shaping the JSON bodies returned by the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::form::FormErrors;

/// The message used when a query matched nothing.
pub const NO_VALUES_MESSAGE: &str = "no values with these criteria";

/// The message used when the values of a transaction are invalid.
pub const WRONG_INPUT_DATA_MESSAGE: &str = "wrong input data";

/// The message used when query parameters are invalid.
pub const WRONG_INPUT_MESSAGE: &str = "wrong input";

/// The message used when an update or delete refers to an unknown transaction.
pub const NO_TRANSACTION_MESSAGE: &str = "no transaction with this id";

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct InvalidInputBody<'a> {
    message: &'a str,
    errors: &'a FormErrors,
}

/// Respond with `{"message": message}`.
pub fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(MessageBody { message })).into_response()
}

/// Respond with `{"message": message}` and status 200 OK.
pub fn ok_message(message: &str) -> Response {
    message_response(StatusCode::OK, message)
}

/// Respond with `{"message": message, "errors": {...}}` and status 400.
pub fn invalid_input_response(message: &str, errors: &FormErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(InvalidInputBody { message, errors }),
    )
        .into_response()
}
