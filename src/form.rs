//! Field-level validation of request data.
//!
//! A [Form] declares the field names it reads and converts a loosely typed
//! [FormData] map into a typed value. Conversion failures are collected per
//! field into [FormErrors] so the client sees every problem at once.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use time::Date;

use crate::{category::CategoryName, dates::parse_date};

/// Raw field values taken from a JSON body or a query string.
pub type FormData = Map<String, Value>;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_NUMBER_MESSAGE: &str = "Enter a number.";
pub const INVALID_INTEGER_MESSAGE: &str = "Enter a whole number.";
pub const INVALID_DATE_MESSAGE: &str = "Enter a valid date in the format YYYY-MM-DD.";
pub const INVALID_CATEGORY_MESSAGE: &str = "Enter a category name.";
pub const INVALID_TEXT_MESSAGE: &str = "Enter a valid value.";

/// A set of named fields that can be validated and converted into `Self`.
pub trait Form: Sized {
    /// The names of every field the form reads.
    ///
    /// The body and query guards reject requests where any of these keys is
    /// absent, before [Form::validate] looks at the values.
    const FIELDS: &'static [&'static str];

    /// Convert `data` into the typed form.
    ///
    /// # Errors
    /// Returns the error messages for every field that could not be converted.
    fn validate(data: &FormData) -> Result<Self, FormErrors>;
}

/// Validation errors keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    /// Record `message` against `field`.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.to_owned());
    }

    /// The messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Converts the fields of a [FormData] one at a time, remembering every failure.
///
/// Each method returns `None` when the field is invalid so that a form can
/// keep going and report all invalid fields together via [FieldCleaner::finish].
pub struct FieldCleaner<'a> {
    data: &'a FormData,
    errors: FormErrors,
}

impl<'a> FieldCleaner<'a> {
    pub fn new(data: &'a FormData) -> Self {
        Self {
            data,
            errors: FormErrors::default(),
        }
    }

    /// A required, finite floating point number.
    pub fn float(&mut self, name: &str) -> Option<f64> {
        self.clean(name, clean_float)
    }

    /// A required integer.
    pub fn integer(&mut self, name: &str) -> Option<i64> {
        self.clean(name, clean_integer)
    }

    /// A required `YYYY-MM-DD` date.
    pub fn date(&mut self, name: &str) -> Option<Date> {
        self.clean(name, clean_date)
    }

    /// A required category, referenced by its name.
    pub fn category_name(&mut self, name: &str) -> Option<CategoryName> {
        self.clean(name, clean_category_name)
    }

    /// An optional string, kept as sent, where a missing or blank value is `None`.
    pub fn optional_text(&mut self, name: &str) -> Option<Option<String>> {
        self.clean(name, clean_optional_text)
    }

    /// An optional `YYYY-MM-DD` date, where a missing or blank value is `None`.
    pub fn optional_date(&mut self, name: &str) -> Option<Option<Date>> {
        self.clean(name, clean_optional_date)
    }

    /// Build the form from the cleaned values, or return the collected errors.
    ///
    /// `build` is only called when no field failed.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, FormErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        match build() {
            Some(form) => Ok(form),
            None => Err(self.errors),
        }
    }

    fn clean<T>(
        &mut self,
        name: &str,
        convert: fn(Option<&Value>) -> Result<T, &'static str>,
    ) -> Option<T> {
        match convert(self.data.get(name)) {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.add(name, message);
                None
            }
        }
    }
}

/// Treat null and blank strings the same as a missing key.
fn non_blank(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.trim().is_empty() => None,
        Some(value) => Some(value),
    }
}

fn clean_float(value: Option<&Value>) -> Result<f64, &'static str> {
    let number = match non_blank(value).ok_or(REQUIRED_MESSAGE)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|number| number.is_finite())
        .ok_or(INVALID_NUMBER_MESSAGE)
}

fn clean_integer(value: Option<&Value>) -> Result<i64, &'static str> {
    let float_to_integer = |number: f64| {
        (number.is_finite() && number.fract() == 0.0 && number.abs() < i64::MAX as f64)
            .then_some(number as i64)
    };

    let integer = match non_blank(value).ok_or(REQUIRED_MESSAGE)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(float_to_integer)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(float_to_integer))
        }
        _ => None,
    };

    integer.ok_or(INVALID_INTEGER_MESSAGE)
}

fn clean_date(value: Option<&Value>) -> Result<Date, &'static str> {
    match non_blank(value).ok_or(REQUIRED_MESSAGE)? {
        Value::String(text) => parse_date(text).map_err(|_| INVALID_DATE_MESSAGE),
        _ => Err(INVALID_DATE_MESSAGE),
    }
}

fn clean_category_name(value: Option<&Value>) -> Result<CategoryName, &'static str> {
    match non_blank(value).ok_or(REQUIRED_MESSAGE)? {
        Value::String(text) => CategoryName::new(text).map_err(|_| REQUIRED_MESSAGE),
        Value::Number(number) => Ok(CategoryName::new_unchecked(&number.to_string())),
        _ => Err(INVALID_CATEGORY_MESSAGE),
    }
}

fn clean_optional_text(value: Option<&Value>) -> Result<Option<String>, &'static str> {
    match non_blank(value) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.to_owned())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(_) => Err(INVALID_TEXT_MESSAGE),
    }
}

fn clean_optional_date(value: Option<&Value>) -> Result<Option<Date>, &'static str> {
    match non_blank(value) {
        None => Ok(None),
        Some(_) => clean_date(value).map(Some),
    }
}
