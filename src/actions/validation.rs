//! Form schema shared by the create and update actions.

use serde::Serialize;

use crate::models::{InvoiceChanges, InvoiceStatus, NewInvoice};

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const AMOUNT_NOT_POSITIVE: &str = "Please enter an amount greater than $0.";
pub const AMOUNT_NOT_A_NUMBER: &str = "Expected number, received nan";
pub const AMOUNT_TOO_LARGE: &str = "Please enter an amount no greater than $21,474,836.47.";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Raw invoice form as submitted by the browser.
///
/// Every field is optional so a missing field becomes a field error rather
/// than an extractor rejection.
#[derive(Debug, Default, Clone)]
pub struct InvoiceForm {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

impl InvoiceForm {
    /// Build a form from decoded key/value pairs. The first value of a
    /// repeated key wins; unknown keys such as `date` are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "customerId" => &mut form.customer_id,
                "amount" => &mut form.amount,
                "status" => &mut form.status,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }
}

/// Field-level messages, serialised with the form's field names
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customer_id: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amount: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_empty() && self.amount.is_empty() && self.status.is_empty()
    }
}

/// A form that passed validation, with the amount already in cents
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInvoice {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}

impl ValidatedInvoice {
    pub fn into_new(self, date: chrono::NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
            date,
        }
    }

    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount_cents: self.amount_cents,
            status: self.status,
        }
    }
}

/// Convert a dollar amount to integer cents.
///
/// Returns `None` when the rounded value does not fit the `amount` column (INT).
pub fn to_cents(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();
    if cents.is_finite() && cents >= f64::from(i32::MIN) && cents <= f64::from(i32::MAX) {
        Some(cents as i64)
    } else {
        None
    }
}

/// Coerce a form value to a number. Blank or missing values coerce to zero,
/// anything unparseable to NaN.
fn coerce_amount(raw: Option<&str>) -> f64 {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn validate(form: &InvoiceForm) -> Result<ValidatedInvoice, FieldErrors> {
    let mut errors = FieldErrors::default();

    let customer_id = match form.customer_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(id.to_string()),
        _ => {
            errors.customer_id.push(CUSTOMER_REQUIRED.to_string());
            None
        }
    };

    // The stored cents, not the dollar input, must be positive: 0.004 rounds to 0.
    let amount = coerce_amount(form.amount.as_deref());
    let amount_cents = if amount.is_nan() {
        errors.amount.push(AMOUNT_NOT_A_NUMBER.to_string());
        None
    } else {
        match to_cents(amount) {
            Some(cents) if cents > 0 => Some(cents),
            None if amount > 0.0 => {
                errors.amount.push(AMOUNT_TOO_LARGE.to_string());
                None
            }
            _ => {
                errors.amount.push(AMOUNT_NOT_POSITIVE.to_string());
                None
            }
        }
    };

    let status = match form.status.as_deref() {
        None => {
            errors.status.push(STATUS_REQUIRED.to_string());
            None
        }
        Some(raw) => match raw.parse::<InvoiceStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.status.push(format!(
                    "Invalid enum value. Expected 'pending' | 'paid', received '{}'",
                    raw
                ));
                None
            }
        },
    };

    match (customer_id, amount_cents, status) {
        (Some(customer_id), Some(amount_cents), Some(status)) => Ok(ValidatedInvoice {
            customer_id,
            amount_cents,
            status,
        }),
        _ => Err(errors),
    }
}
