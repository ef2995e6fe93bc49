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
    core::{get_transaction, update_transaction},
    forms::UpdateTransactionForm,
};

/// A route handler that overwrites the amount, category and date of a transaction.
///
/// An unknown ID is answered with a message and status 200 OK, and is reported
/// before any invalid values in the body.
pub async fn update_transaction_endpoint(
    State(state): State<AppState>,
    body: JsonFields<UpdateTransactionForm>,
) -> Result<Response, Error> {
    let UpdateTransactionForm { id, transaction } =
        match UpdateTransactionForm::validate(&body.into_data()) {
            Ok(form) => form,
            Err(errors) => return Ok(invalid_input_response(WRONG_INPUT_DATA_MESSAGE, &errors)),
        };

    let connection = state.connection()?;
    let sql_transaction = connection.unchecked_transaction()?;

    let original = match get_transaction(id, &sql_transaction) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => {
            tracing::debug!("Could not update transaction #{id}: no such transaction");
            return Ok(ok_message(NO_TRANSACTION_MESSAGE));
        }
        Err(error) => return Err(error),
    };

    let form = match transaction {
        Ok(form) => form,
        Err(errors) => return Ok(invalid_input_response(WRONG_INPUT_DATA_MESSAGE, &errors)),
    };

    let updated = update_transaction(id, form.into(), &sql_transaction)?;
    sql_transaction.commit()?;

    tracing::info!("Updated transaction #{id} from \"{original}\" to \"{updated}\"");

    Ok(ok_message(&format!("transaction {updated} updated")))
}
