//! Request guards that run ahead of the route handlers.
//!
//! Guards are applied cheapest first: the method guard (a middleware), then
//! the body or query field guard (an extractor). Each one either passes the
//! request on or ends it with a JSON error response, so a handler only runs
//! once every guard in front of it has passed.

mod body;
mod method;
mod query;

use axum::{http::StatusCode, response::Response};

pub use body::JsonFields;
pub use method::only;
pub use query::QueryFields;

use crate::{form::FormData, response::message_response};

/// The message returned when one of a form's fields is absent.
pub const MISSING_FIELDS_MESSAGE: &str = "wrong or missing fieldnames";

/// Check that every name in `fields` is a key of `data`.
///
/// Only presence is checked here, the values are validated later by the form.
fn require_fields(fields: &[&str], data: &FormData) -> Result<(), Response> {
    match fields.iter().find(|field| !data.contains_key(**field)) {
        Some(missing_field) => {
            tracing::debug!("Rejected request with missing field \"{missing_field}\"");
            Err(message_response(
                StatusCode::BAD_REQUEST,
                MISSING_FIELDS_MESSAGE,
            ))
        }
        None => Ok(()),
    }
}
