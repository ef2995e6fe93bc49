//! The API endpoints URIs.
//!
//! Every endpoint ends with a slash and accepts exactly one HTTP method.

/// The route for the balance of every transaction (GET).
pub const ROOT: &str = "/";
/// The route for recording a new transaction (POST).
pub const ADD: &str = "/add/";
/// The route for overwriting an existing transaction (POST).
pub const UPDATE: &str = "/update/";
/// The route for deleting a transaction (POST).
pub const DELETE: &str = "/delete/";
/// The route for the total income within a date range (GET).
pub const INCOME: &str = "/get/income/";
/// The route for the total expenses within a date range (GET).
pub const EXPENSES: &str = "/get/expenses/";
/// The route for listing and filtering transactions (GET).
pub const TRANSACTIONS: &str = "/get/transactions/";
