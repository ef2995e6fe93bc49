//! The `YYYY-MM-DD` date format shared by the JSON API and the query string.

use serde::Serializer;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The only date format accepted and produced by the API.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text.trim(), DATE_FORMAT)
}

/// Serialize `date` as a `YYYY-MM-DD` string.
///
/// Use with `#[serde(serialize_with = "serialize_date")]`.
pub fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let text = date
        .format(DATE_FORMAT)
        .map_err(serde::ser::Error::custom)?;

    serializer.serialize_str(&text)
}
