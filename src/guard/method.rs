//! The method guard.

use axum::{
    extract::{Request, State},
    handler::Handler,
    http::{HeaderValue, Method, StatusCode, header::ALLOW},
    middleware::{self, Next},
    response::Response,
    routing::{MethodRouter, any},
};

use crate::{AppState, response::message_response};

/// The message returned when a route is called with the wrong HTTP method.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Middleware that only lets requests with the `expected` method through.
///
/// Any other method is answered with 405 Method Not Allowed without calling
/// the inner handler, so the request body is never parsed.
pub async fn allowed_method(
    State(expected): State<Method>,
    request: Request,
    next: Next,
) -> Response {
    if *request.method() == expected {
        return next.run(request).await;
    }

    tracing::debug!(
        "Rejected {} request to {}, expected {expected}",
        request.method(),
        request.uri().path()
    );

    let mut response = message_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE);
    if let Ok(allow) = HeaderValue::from_str(expected.as_str()) {
        response.headers_mut().insert(ALLOW, allow);
    }

    response
}

/// Route every method to `handler`, guarded so that only `method` reaches it.
pub fn only<H, T>(method: Method, handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    any(handler).layer(middleware::from_fn_with_state(method, allowed_method))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::{Method, StatusCode, header::ALLOW},
    };
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::AppState;

    use super::only;

    async fn mocked_view() -> &'static str {
        "called"
    }

    fn get_test_server(method: Method) -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap())
            .expect("Could not create app state");
        let app = Router::new()
            .route("/", only(method, mocked_view))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn get_guard_rejects_post_request() {
        let server = get_test_server(Method::GET);

        let response = server.post("/").await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.header(ALLOW), "GET");
        assert_eq!(
            response.json::<Value>(),
            json!({"message": "Method not allowed"})
        );
    }

    #[tokio::test]
    async fn get_guard_passes_get_request() {
        let server = get_test_server(Method::GET);

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text("called");
    }

    #[tokio::test]
    async fn post_guard_rejects_get_request() {
        let server = get_test_server(Method::POST);

        server
            .get("/")
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
