//! The request forms for the transaction endpoints.

use time::Date;

use crate::{
    category::CategoryName,
    database_id::TransactionId,
    form::{FieldCleaner, Form, FormData, FormErrors},
};

use super::{
    core::NewTransaction,
    query::{DateRange, TransactionFilter},
};

/// The values of a transaction to add or to overwrite an existing one with.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub amount: f64,
    pub category: CategoryName,
    pub transaction_at: Date,
}

impl Form for TransactionForm {
    const FIELDS: &'static [&'static str] = &["amount", "category", "transaction_at"];

    fn validate(data: &FormData) -> Result<Self, FormErrors> {
        let mut cleaner = FieldCleaner::new(data);
        let amount = cleaner.float("amount");
        let category = cleaner.category_name("category");
        let transaction_at = cleaner.date("transaction_at");

        cleaner.finish(|| {
            Some(Self {
                amount: amount?,
                category: category?,
                transaction_at: transaction_at?,
            })
        })
    }
}

impl From<TransactionForm> for NewTransaction {
    fn from(form: TransactionForm) -> Self {
        NewTransaction::new(form.amount, form.category, form.transaction_at)
    }
}

/// The body of an update request: the transaction ID plus the new values.
///
/// Only an invalid ID fails validation. The outcome of validating the new
/// values is kept in `transaction` so that an unknown ID can be reported
/// before bad values.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTransactionForm {
    pub id: TransactionId,
    pub transaction: Result<TransactionForm, FormErrors>,
}

impl Form for UpdateTransactionForm {
    const FIELDS: &'static [&'static str] = &["id", "amount", "category", "transaction_at"];

    fn validate(data: &FormData) -> Result<Self, FormErrors> {
        let TransactionIdForm { id } = TransactionIdForm::validate(data)?;

        Ok(Self {
            id,
            transaction: TransactionForm::validate(data),
        })
    }
}

/// A request that identifies a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionIdForm {
    pub id: TransactionId,
}

impl Form for TransactionIdForm {
    const FIELDS: &'static [&'static str] = &["id"];

    fn validate(data: &FormData) -> Result<Self, FormErrors> {
        let mut cleaner = FieldCleaner::new(data);
        let id = cleaner.integer("id");

        cleaner.finish(|| Some(Self { id: id? }))
    }
}

/// The inclusive date range for the income and expense totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeForm {
    pub start_date: Date,
    pub end_date: Date,
}

impl Form for DateRangeForm {
    const FIELDS: &'static [&'static str] = &["start_date", "end_date"];

    fn validate(data: &FormData) -> Result<Self, FormErrors> {
        let mut cleaner = FieldCleaner::new(data);
        let start_date = cleaner.date("start_date");
        let end_date = cleaner.date("end_date");

        cleaner.finish(|| {
            Some(Self {
                start_date: start_date?,
                end_date: end_date?,
            })
        })
    }
}

impl From<DateRangeForm> for DateRange {
    fn from(form: DateRangeForm) -> Self {
        DateRange {
            start: form.start_date,
            end: form.end_date,
        }
    }
}

/// The optional filters for listing transactions.
///
/// Other query parameters are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilterForm {
    pub category: Option<String>,
    pub transaction_at: Option<Date>,
}

impl Form for TransactionFilterForm {
    // Both fields are optional, so the query guard has nothing to require.
    const FIELDS: &'static [&'static str] = &[];

    fn validate(data: &FormData) -> Result<Self, FormErrors> {
        let mut cleaner = FieldCleaner::new(data);
        let category = cleaner.optional_text("category");
        let transaction_at = cleaner.optional_date("transaction_at");

        cleaner.finish(|| {
            Some(Self {
                category: category?,
                transaction_at: transaction_at?,
            })
        })
    }
}

impl From<TransactionFilterForm> for TransactionFilter {
    fn from(form: TransactionFilterForm) -> Self {
        TransactionFilter::default()
            .category(form.category.as_deref().map(CategoryName::new_unchecked))
            .transaction_at(form.transaction_at)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        category::CategoryName,
        form::{Form, FormData, INVALID_INTEGER_MESSAGE, INVALID_NUMBER_MESSAGE},
        transaction::query::TransactionFilter,
    };

    use super::{
        DateRangeForm, TransactionFilterForm, TransactionForm, TransactionIdForm,
        UpdateTransactionForm,
    };

    fn form_data(value: Value) -> FormData {
        match value {
            Value::Object(map) => map,
            _ => panic!("test form data must be an object"),
        }
    }

    #[test]
    fn transaction_form_converts_values() {
        let data = form_data(json!({"amount": 100, "category": "general", "transaction_at": "2021-01-21"}));

        let form = TransactionForm::validate(&data).expect("form should be valid");

        assert_eq!(
            form,
            TransactionForm {
                amount: 100.0,
                category: CategoryName::new_unchecked("general"),
                transaction_at: date!(2021 - 01 - 21),
            }
        );
    }

    #[test]
    fn transaction_form_reports_invalid_amount() {
        let data = form_data(
            json!({"amount": "a string", "category": "general", "transaction_at": "2021-01-21"}),
        );

        let errors = TransactionForm::validate(&data).unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"amount": [INVALID_NUMBER_MESSAGE]})
        );
    }

    #[test]
    fn update_form_reports_only_id_errors_for_invalid_id() {
        let data = form_data(
            json!({"id": "one", "amount": "a string", "category": "rent", "transaction_at": "2021-01-01"}),
        );

        let errors = UpdateTransactionForm::validate(&data).unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"id": [INVALID_INTEGER_MESSAGE]})
        );
    }

    #[test]
    fn update_form_keeps_value_errors_for_valid_id() {
        let data = form_data(
            json!({"id": 4, "amount": "a string", "category": "rent", "transaction_at": "2021-01-01"}),
        );

        let form = UpdateTransactionForm::validate(&data).expect("id should be valid");

        assert_eq!(form.id, 4);
        assert_eq!(
            serde_json::to_value(form.transaction.unwrap_err()).unwrap(),
            json!({"amount": [INVALID_NUMBER_MESSAGE]})
        );
    }

    #[test]
    fn id_form_accepts_integer() {
        let data = form_data(json!({"id": 3}));

        assert_eq!(
            TransactionIdForm::validate(&data),
            Ok(TransactionIdForm { id: 3 })
        );
    }

    #[test]
    fn date_range_form_requires_both_dates() {
        let data = form_data(json!({"start_date": "2021-01-01", "end_date": ""}));

        let errors = DateRangeForm::validate(&data).unwrap_err();

        assert!(errors.get("start_date").is_none());
        assert!(errors.get("end_date").is_some());
    }

    #[test]
    fn filter_form_ignores_unknown_fields() {
        let data = form_data(json!({"something": "transfer"}));

        let form = TransactionFilterForm::validate(&data).unwrap();

        assert_eq!(TransactionFilter::from(form), TransactionFilter::default());
    }

    #[test]
    fn filter_form_rejects_invalid_date() {
        let data = form_data(json!({"category": "general", "transaction_at": "11/1/2020"}));

        let errors = TransactionFilterForm::validate(&data).unwrap_err();

        assert!(errors.get("transaction_at").is_some());
        assert!(errors.get("category").is_none());
    }
}
