use axum::{extract::State, response::Response};

use crate::{
    AppState, Error,
    form::Form,
    guard::JsonFields,
    response::{
        NO_TRANSACTION_MESSAGE, WRONG_INPUT_DATA_MESSAGE, invalid_input_response, ok_message,
    },
};

use super::{
    core::{delete_transaction, get_transaction},
    forms::TransactionIdForm,
};

/// A route handler for permanently deleting a transaction.
///
/// Responds with the deleted transaction's details, or with a message and
/// status 200 OK if there is no transaction with the given ID.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    body: JsonFields<TransactionIdForm>,
) -> Result<Response, Error> {
    let id = match TransactionIdForm::validate(&body.into_data()) {
        Ok(form) => form.id,
        Err(errors) => return Ok(invalid_input_response(WRONG_INPUT_DATA_MESSAGE, &errors)),
    };

    let connection = state.connection()?;

    let transaction = match get_transaction(id, &connection) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => {
            tracing::debug!("Could not delete transaction #{id}: no such transaction");
            return Ok(ok_message(NO_TRANSACTION_MESSAGE));
        }
        Err(error) => return Err(error),
    };

    delete_transaction(id, &connection)?;
    tracing::info!("Deleted transaction #{id}: {transaction}");

    Ok(ok_message(&format!("transaction {transaction} deleted")))
}
