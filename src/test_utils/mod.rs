//! Shared setup for the HTTP level tests.

use axum_test::TestServer;
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, build_router,
    category::CategoryName,
    transaction::{NewTransaction, Transaction, create_transaction},
};

/// Create app state backed by a fresh in-memory database.
pub(crate) fn get_test_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection).expect("Could not create app state.")
}

/// Serve the full router against `state`.
pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Insert a transaction directly into the database behind `state`.
#[track_caller]
pub(crate) fn insert_transaction(
    state: &AppState,
    amount: f64,
    category: &str,
    transaction_at: Date,
) -> Transaction {
    let connection = state.db_connection.lock().unwrap();

    create_transaction(
        NewTransaction::new(
            amount,
            CategoryName::new_unchecked(category),
            transaction_at,
        ),
        &connection,
    )
    .expect("Could not create test transaction")
}
