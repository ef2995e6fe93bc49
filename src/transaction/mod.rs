//! Transactions: the incomes and expenses recorded in the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its database functions
//! - Aggregate queries (balance, totals by date range) and filtered listings
//! - The request forms and route handlers of the JSON API

mod add_endpoint;
mod balance_endpoint;
mod core;
mod delete_endpoint;
mod forms;
mod list_endpoint;
mod query;
mod totals_endpoint;
mod update_endpoint;

pub use add_endpoint::add_transaction_endpoint;
pub use balance_endpoint::get_balance_endpoint;
pub use core::{
    NewTransaction, Transaction, count_transactions, create_transaction, create_transaction_table,
    delete_transaction, get_transaction, update_transaction,
};
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::get_transactions_endpoint;
pub use query::{
    DateRange, TotalKind, TransactionFilter, get_balance, get_transactions,
    has_transactions_in_range, sum_in_range,
};
pub use totals_endpoint::{get_expenses_endpoint, get_income_endpoint};
pub use update_endpoint::update_transaction_endpoint;
