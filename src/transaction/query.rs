//! Aggregate and filtered queries over transactions.

use rusqlite::{Connection, ToSql};
use time::Date;

use crate::{Error, category::CategoryName};

use super::core::{SELECT_TRANSACTION, Transaction, map_transaction_row};

/// An inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first day in the range.
    pub start: Date,
    /// The last day in the range.
    pub end: Date,
}

/// Which side of the ledger a total is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalKind {
    /// Strictly positive amounts.
    Income,
    /// Zero and negative amounts.
    Expenses,
}

impl TotalKind {
    /// The JSON key the total is reported under, e.g. "total_income".
    pub fn response_key(self) -> &'static str {
        match self {
            TotalKind::Income => "total_income",
            TotalKind::Expenses => "total_expenses",
        }
    }

    fn amount_condition(self) -> &'static str {
        match self {
            TotalKind::Income => "amount > 0",
            TotalKind::Expenses => "amount <= 0",
        }
    }
}

/// Optional filters for [get_transactions]. Every filter that is set must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Only transactions in the category with exactly this name.
    pub category: Option<CategoryName>,
    /// Only transactions on this day.
    pub transaction_at: Option<Date>,
}

impl TransactionFilter {
    /// Only include transactions in the category `name`.
    pub fn category(mut self, name: Option<CategoryName>) -> Self {
        self.category = name;
        self
    }

    /// Only include transactions on `date`.
    pub fn transaction_at(mut self, date: Option<Date>) -> Self {
        self.transaction_at = date;
        self
    }

    /// Whether no filter is set, i.e. the filter would match every transaction.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.transaction_at.is_none()
    }
}

/// Sum the amounts of every transaction, or `None` if there are no transactions.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_balance(connection: &Connection) -> Result<Option<f64>, Error> {
    connection
        .query_row("SELECT SUM(amount) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(Error::from)
}

/// Whether any transaction, of any sign, falls within `range`.
pub fn has_transactions_in_range(range: DateRange, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS (SELECT 1 FROM \"transaction\" WHERE transaction_at BETWEEN ?1 AND ?2);",
            (range.start, range.end),
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Sum the income or expense amounts of the transactions within `range`.
///
/// Returns `None` when no transaction in the range has the sign selected by `kind`.
pub fn sum_in_range(
    kind: TotalKind,
    range: DateRange,
    connection: &Connection,
) -> Result<Option<f64>, Error> {
    let query = format!(
        "SELECT SUM(amount) FROM \"transaction\" \
        WHERE transaction_at BETWEEN ?1 AND ?2 AND {};",
        kind.amount_condition()
    );

    connection
        .query_row(&query, (range.start, range.end), |row| row.get(0))
        .map_err(Error::from)
}

/// Get the transactions matching `filter` in order of ascending ID.
///
/// An empty filter returns every transaction.
pub fn get_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut conditions = Vec::new();
    let mut params: Vec<(&str, &dyn ToSql)> = Vec::new();

    if let Some(category) = &filter.category {
        conditions.push("category.name = :category");
        params.push((":category", category as &dyn ToSql));
    }

    if let Some(transaction_at) = &filter.transaction_at {
        conditions.push("\"transaction\".transaction_at = :transaction_at");
        params.push((":transaction_at", transaction_at as &dyn ToSql));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let query = format!("{SELECT_TRANSACTION} {where_clause} ORDER BY \"transaction\".id ASC");

    connection
        .prepare(&query)?
        .query_map(params.as_slice(), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}
