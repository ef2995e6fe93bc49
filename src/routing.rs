//! Application router configuration.

use axum::{
    Router,
    http::{Method, StatusCode},
    response::Response,
};

use crate::{
    AppState, endpoints,
    guard::only,
    response::message_response,
    transaction::{
        add_transaction_endpoint, delete_transaction_endpoint, get_balance_endpoint,
        get_expenses_endpoint, get_income_endpoint, get_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Each route accepts a single method. Any other method is answered with
/// 405 Method Not Allowed without calling the route's handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, only(Method::GET, get_balance_endpoint))
        .route(endpoints::ADD, only(Method::POST, add_transaction_endpoint))
        .route(
            endpoints::UPDATE,
            only(Method::POST, update_transaction_endpoint),
        )
        .route(
            endpoints::DELETE,
            only(Method::POST, delete_transaction_endpoint),
        )
        .route(endpoints::INCOME, only(Method::GET, get_income_endpoint))
        .route(endpoints::EXPENSES, only(Method::GET, get_expenses_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            only(Method::GET, get_transactions_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    message_response(StatusCode::NOT_FOUND, "not found")
}
