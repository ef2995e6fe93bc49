//! The query string field guard.

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::Response,
};
use serde_json::Value;

use crate::{
    form::{Form, FormData},
    guard::{MISSING_FIELDS_MESSAGE, require_fields},
    response::message_response,
};

/// Extractor for query parameters that include every field of the form `F`.
///
/// Values are kept as strings. When a key is repeated the last value wins.
#[derive(Debug)]
pub struct QueryFields<F> {
    data: FormData,
    form: PhantomData<fn() -> F>,
}

impl<F> QueryFields<F> {
    /// The query parameters as a key-value mapping.
    pub fn into_data(self) -> FormData {
        self.data
    }
}

impl<S, F> FromRequestParts<S> for QueryFields<F>
where
    S: Send + Sync,
    F: Form,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();

        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).map_err(|error| {
            tracing::debug!("Could not parse query string \"{query}\": {error}");
            message_response(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
        })?;

        let data: FormData = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        require_fields(F::FIELDS, &data)?;

        Ok(Self {
            data,
            form: PhantomData,
        })
    }
}
