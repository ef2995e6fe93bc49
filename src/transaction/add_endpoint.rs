use axum::{extract::State, response::Response};

use crate::{
    AppState, Error,
    form::Form,
    guard::JsonFields,
    response::{WRONG_INPUT_DATA_MESSAGE, invalid_input_response, ok_message},
};

use super::{core::create_transaction, forms::TransactionForm};

/// A route handler that records a new income or expense.
///
/// The category named in the body is created if it does not exist yet. Invalid
/// values are rejected before anything is written.
pub async fn add_transaction_endpoint(
    State(state): State<AppState>,
    body: JsonFields<TransactionForm>,
) -> Result<Response, Error> {
    let form = match TransactionForm::validate(&body.into_data()) {
        Ok(form) => form,
        Err(errors) => {
            tracing::debug!("Rejected new transaction: {errors:?}");
            return Ok(invalid_input_response(WRONG_INPUT_DATA_MESSAGE, &errors));
        }
    };

    let connection = state.connection()?;
    let sql_transaction = connection.unchecked_transaction()?;
    let transaction = create_transaction(form.into(), &sql_transaction)?;
    sql_transaction.commit()?;

    tracing::info!("Saved transaction #{}: {transaction}", transaction.id);

    Ok(ok_message("transaction saved"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        category::count_categories,
        endpoints,
        test_utils::{get_test_server, get_test_state},
        transaction::{count_transactions, get_transaction},
    };

    #[tokio::test]
    async fn saves_transaction() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::ADD)
            .json(&json!({"amount": 100, "category": "general", "transaction_at": "2021-01-21"}))
            .await;

        response.assert_status_ok();
        response.assert_text(r#"{"message":"transaction saved"}"#);

        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.amount, 100.0);
        assert_eq!(transaction.category.as_ref(), "general");
        assert_eq!(transaction.transaction_at.to_string(), "2021-01-21");
    }

    #[tokio::test]
    async fn accepts_numeric_strings() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        server
            .post(endpoints::ADD)
            .json(&json!({"amount": "-12.5", "category": "food", "transaction_at": "2021-01-21"}))
            .await
            .assert_status_ok();

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_transaction(1, &connection).unwrap().amount, -12.5);
    }

    #[tokio::test]
    async fn category_names_must_match_exactly_to_be_reused() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        for category in ["rent", " rent ", "rent"] {
            server
                .post(endpoints::ADD)
                .json(&json!({"amount": -300, "category": category, "transaction_at": "2021-01-01"}))
                .await
                .assert_status_ok();
        }

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_categories(&connection), Ok(2));
        assert_eq!(get_transaction(2, &connection).unwrap().category.as_ref(), " rent ");
    }

    #[tokio::test]
    async fn rejects_invalid_json() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::ADD)
            .text(r#"{"amount": 100, "category": "general""#)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text(r#"{"message":"failed to load json data"}"#);
    }

    #[tokio::test]
    async fn rejects_misspelled_field_name() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::ADD)
            .json(&json!({"amou": 100, "category": "general", "transaction_at": "2021-01-21"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text(r#"{"message":"wrong or missing fieldnames"}"#);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection), Ok(0));
    }

    #[tokio::test]
    async fn rejects_invalid_amount_without_writing() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::ADD)
            .json(&json!({"amount": "a string", "category": "general", "transaction_at": "2021-01-21"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"message": "wrong input data", "errors": {"amount": ["Enter a number."]}})
        );

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection), Ok(0));
        assert_eq!(count_categories(&connection), Ok(0));
    }

    #[tokio::test]
    async fn rejects_invalid_date() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::ADD)
            .json(&json!({"amount": 100, "category": "general", "transaction_at": "21/01/2021"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["errors"],
            json!({"transaction_at": ["Enter a valid date in the format YYYY-MM-DD."]})
        );
    }

    #[tokio::test]
    async fn rejects_get_request() {
        let server = get_test_server(get_test_state());

        server
            .get(endpoints::ADD)
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
