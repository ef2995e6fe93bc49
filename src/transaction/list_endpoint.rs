use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use time::Date;

use crate::{
    AppState, Error,
    dates::serialize_date,
    database_id::TransactionId,
    form::Form,
    guard::QueryFields,
    response::{NO_VALUES_MESSAGE, WRONG_INPUT_MESSAGE, invalid_input_response, ok_message},
};

use super::{
    core::Transaction,
    forms::TransactionFilterForm,
    query::{TransactionFilter, get_transactions},
};

const NO_FILTER_MESSAGE: &str = "wrong field or no value for field";

/// A transaction as it appears in the listing.
#[derive(Debug, Serialize)]
struct TransactionRecord<'a> {
    id: TransactionId,
    amount: f64,
    category_type: &'a str,
    #[serde(serialize_with = "serialize_date")]
    transaction_at: Date,
}

impl<'a> From<&'a Transaction> for TransactionRecord<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            id: transaction.id,
            amount: transaction.amount,
            category_type: transaction.category.as_ref(),
            transaction_at: transaction.transaction_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultsBody<'a> {
    results: Vec<TransactionRecord<'a>>,
}

/// A route handler that lists transactions in order of ascending ID.
///
/// Without query parameters every transaction is listed. Otherwise the
/// `category` and `transaction_at` parameters select the transactions with
/// exactly that category name and/or date.
pub async fn get_transactions_endpoint(
    State(state): State<AppState>,
    query: QueryFields<TransactionFilterForm>,
) -> Result<Response, Error> {
    let data = query.into_data();

    let filter = if data.is_empty() {
        TransactionFilter::default()
    } else {
        let filter: TransactionFilter = match TransactionFilterForm::validate(&data) {
            Ok(form) => form.into(),
            Err(errors) => return Ok(invalid_input_response(WRONG_INPUT_MESSAGE, &errors)),
        };

        if filter.is_empty() {
            return Ok(ok_message(NO_FILTER_MESSAGE));
        }

        filter
    };

    let connection = state.connection()?;
    let transactions = get_transactions(&filter, &connection)?;

    if transactions.is_empty() && !filter.is_empty() {
        return Ok(ok_message(NO_VALUES_MESSAGE));
    }

    let results = transactions.iter().map(TransactionRecord::from).collect();

    Ok(Json(ResultsBody { results }).into_response())
}
