//! The JSON body field guard.

use std::marker::PhantomData;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{
    form::{Form, FormData},
    guard::{MISSING_FIELDS_MESSAGE, require_fields},
    response::message_response,
};

/// The message returned when the request body is not valid JSON.
pub const INVALID_JSON_MESSAGE: &str = "failed to load json data";

/// Extractor for a JSON object body that contains every field of the form `F`.
///
/// The body is rejected with 400 Bad Request if it is not valid JSON or if any
/// of `F::FIELDS` is missing. Values are not validated here, handlers pass
/// [JsonFields::into_data] to [Form::validate].
#[derive(Debug)]
pub struct JsonFields<F> {
    data: FormData,
    form: PhantomData<fn() -> F>,
}

impl<F> JsonFields<F> {
    /// The parsed key-value mapping of the request body.
    pub fn into_data(self) -> FormData {
        self.data
    }
}

impl<S, F> FromRequest<S> for JsonFields<F>
where
    S: Send + Sync,
    F: Form,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(request, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let data = parse_json_object(&body)?;
        require_fields(F::FIELDS, &data)?;

        Ok(Self {
            data,
            form: PhantomData,
        })
    }
}

fn parse_json_object(body: &[u8]) -> Result<FormData, Response> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(data)) => Ok(data),
        // Valid JSON that is not an object has none of the form's fields.
        Ok(_) => Err(message_response(
            StatusCode::BAD_REQUEST,
            MISSING_FIELDS_MESSAGE,
        )),
        Err(error) => {
            tracing::debug!("Could not parse request body as JSON: {error}");
            Err(message_response(
                StatusCode::BAD_REQUEST,
                INVALID_JSON_MESSAGE,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        form::{FieldCleaner, Form, FormData, FormErrors},
        guard::JsonFields,
    };

    struct AmountForm;

    impl Form for AmountForm {
        const FIELDS: &'static [&'static str] = &["amount", "category", "transaction_at"];

        fn validate(data: &FormData) -> Result<Self, FormErrors> {
            FieldCleaner::new(data).finish(|| Some(Self))
        }
    }

    async fn mocked_view(fields: JsonFields<AmountForm>) -> Json<FormData> {
        Json(fields.into_data())
    }

    fn get_test_server() -> TestServer {
        let app = Router::new().route("/", post(mocked_view));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn passes_parsed_body_to_handler() {
        let server = get_test_server();
        let body = json!({"amount": 100, "category": "general", "transaction_at": "2021-01-01"});

        let response = server.post("/").json(&body).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), body);
    }

    #[tokio::test]
    async fn fails_with_wrong_fieldnames() {
        let server = get_test_server();

        let response = server
            .post("/")
            .json(&json!({"amou": 100, "category": "general", "transaction_at": "2021-01-01"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text(r#"{"message":"wrong or missing fieldnames"}"#);
    }

    #[tokio::test]
    async fn fails_with_missing_fieldnames() {
        let server = get_test_server();

        let response = server
            .post("/")
            .json(&json!({"category": "general", "transaction_at": "2021-01-01"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text(r#"{"message":"wrong or missing fieldnames"}"#);
    }

    #[tokio::test]
    async fn fails_with_no_json_data() {
        let server = get_test_server();

        let response = server.post("/").text("category").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text(r#"{"message":"failed to load json data"}"#);
    }

    #[tokio::test]
    async fn fails_with_json_that_is_not_an_object() {
        let server = get_test_server();

        let response = server.post("/").json(&json!(["amount"])).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text(r#"{"message":"wrong or missing fieldnames"}"#);
    }
}
