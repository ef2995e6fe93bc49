//! Defines the core data models and database queries for transactions.

use std::fmt::Display;

use rusqlite::{Connection, Row, params};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    category::{CategoryName, get_or_create_category},
    database_id::TransactionId,
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money earned (positive) or spent (zero or negative).
    pub amount: f64,
    /// The name of the category the transaction belongs to.
    pub category: CategoryName,
    /// The day the transaction happened.
    pub transaction_at: Date,
    /// When the transaction was first saved. Never changes.
    pub created_at: OffsetDateTime,
    /// When the transaction was last written.
    pub modified_at: OffsetDateTime,
}

impl Display for Transaction {
    /// Formats as e.g. "rent -300.0 of 2021-01-01".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} of {}",
            self.category,
            format_amount(self.amount),
            self.transaction_at
        )
    }
}

/// Format an amount as the shortest text that reads back as the same number.
///
/// Whole numbers keep a fractional digit ("-300.0"). Very large and very small
/// numbers use an exponent with an explicit sign and at least two digits
/// ("1e+16", "2.5e-05").
fn format_amount(amount: f64) -> String {
    let text = format!("{amount:?}");

    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// The user supplied values of a transaction, used for both inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Positive values are income, zero and negative values are expenses.
    pub amount: f64,
    /// The category name. The category is created if it does not exist yet.
    pub category: CategoryName,
    /// The day the transaction happened.
    pub transaction_at: Date,
}

impl NewTransaction {
    /// Create the values for a transaction.
    pub fn new(amount: f64, category: CategoryName, transaction_at: Date) -> Self {
        Self {
            amount,
            category,
            transaction_at,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns read by [map_transaction_row], joined with the category name.
pub(crate) const SELECT_TRANSACTION: &str = "SELECT \"transaction\".id, amount, category.name, \
    transaction_at, created_at, modified_at FROM \"transaction\" \
    INNER JOIN category ON \"transaction\".category_id = category.id";

/// Create a new transaction in the database, creating its category if needed.
///
/// The category lookup and the insert are two statements, callers that need
/// them to be atomic should pass in an open SQL transaction.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let category = get_or_create_category(&new_transaction.category, connection)?;
    let now = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO \"transaction\" (amount, category_id, transaction_at, created_at, modified_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![
            new_transaction.amount,
            category.id,
            new_transaction.transaction_at,
            now
        ],
    )?;

    get_transaction(connection.last_insert_rowid(), connection)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!("{SELECT_TRANSACTION} WHERE \"transaction\".id = :id"))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Overwrite the amount, category and date of the transaction `id`.
///
/// The ID and creation time are kept and the modification time is refreshed.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    update: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let category = get_or_create_category(&update.category, connection)?;

    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
        SET \
            amount = ?1, \
            category_id = ?2, \
            transaction_at = ?3, \
            modified_at = ?4 \
        WHERE id = ?5;",
        params![
            update.amount,
            category.id,
            update.transaction_at,
            OffsetDateTime::now_utc(),
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    get_transaction(id, connection)
}

type RowsAffected = usize;

/// Permanently delete the transaction `id`.
///
/// Returns the number of deleted rows, which is zero if `id` is unknown.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )
        .map_err(Error::from)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category_id INTEGER NOT NULL,
                transaction_at TEXT NOT NULL,
                created_at TEXT NOT NULL,
                modified_at TEXT NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Used by the date range totals and the date filter.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(transaction_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row selected with [SELECT_TRANSACTION] to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        transaction_at: row.get(3)?,
        created_at: row.get(4)?,
        modified_at: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
