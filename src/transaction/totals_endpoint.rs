use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::{
    AppState, Error,
    form::Form,
    guard::QueryFields,
    response::{NO_VALUES_MESSAGE, WRONG_INPUT_MESSAGE, invalid_input_response},
};

use super::{
    forms::DateRangeForm,
    query::{DateRange, TotalKind, has_transactions_in_range, sum_in_range},
};

/// A route handler for the total income between two dates, inclusive.
pub async fn get_income_endpoint(
    State(state): State<AppState>,
    query: QueryFields<DateRangeForm>,
) -> Result<Response, Error> {
    get_total(TotalKind::Income, state, query)
}

/// A route handler for the total expenses between two dates, inclusive.
pub async fn get_expenses_endpoint(
    State(state): State<AppState>,
    query: QueryFields<DateRangeForm>,
) -> Result<Response, Error> {
    get_total(TotalKind::Expenses, state, query)
}

/// Respond with `{"total_<kind>": <sum>}`.
///
/// The sum is the string "no values with these criteria" when the range holds
/// no transactions, and `null` when it only holds transactions of the other sign.
fn get_total(
    kind: TotalKind,
    state: AppState,
    query: QueryFields<DateRangeForm>,
) -> Result<Response, Error> {
    let range: DateRange = match DateRangeForm::validate(&query.into_data()) {
        Ok(form) => form.into(),
        Err(errors) => return Ok(invalid_input_response(WRONG_INPUT_MESSAGE, &errors)),
    };

    let connection = state.connection()?;

    let total = if has_transactions_in_range(range, &connection)? {
        sum_in_range(kind, range, &connection)?.map_or(Value::Null, Value::from)
    } else {
        Value::from(NO_VALUES_MESSAGE)
    };

    let mut body = Map::new();
    body.insert(kind.response_key().to_owned(), total);

    Ok(Json(Value::Object(body)).into_response())
}
