use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{AppState, Error};

use super::query::get_balance;

#[derive(Debug, Serialize)]
struct BalanceBody {
    balance: Option<f64>,
}

/// A route handler that responds with the sum of every transaction.
///
/// The balance is `null` when there are no transactions at all.
pub async fn get_balance_endpoint(State(state): State<AppState>) -> Result<Response, Error> {
    let connection = state.connection()?;
    let balance = get_balance(&connection)?;

    Ok(Json(BalanceBody { balance }).into_response())
}
