//! Invoice mutation actions.
//!
//! Each action runs one validate, write, invalidate and respond pass. On
//! failure nothing is invalidated and the caller gets an [`ActionError`]
//! describing what went wrong.

mod error;
pub mod validation;

use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::cache::RouteCache;
use crate::db::InvoiceStore;

pub use error::{ActionError, FormState};
pub use validation::{FieldErrors, InvoiceForm, ValidatedInvoice};

/// Route of the invoice listing; every successful mutation revalidates it.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Successful create or update: send the client back to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirected {
    pub to: &'static str,
}

impl IntoResponse for Redirected {
    fn into_response(self) -> Response {
        Redirect::to(self.to).into_response()
    }
}

fn validated(form: &InvoiceForm, failure: &str) -> Result<ValidatedInvoice, ActionError> {
    validation::validate(form).map_err(|errors| {
        debug!(?errors, "invoice form failed validation");
        ActionError::Validation {
            errors,
            message: failure.to_string(),
        }
    })
}

pub async fn create_invoice(
    store: &dyn InvoiceStore,
    cache: &RouteCache,
    form: &InvoiceForm,
) -> Result<Redirected, ActionError> {
    let invoice = validated(form, "Missing Fields. Failed to Create Invoice.")?
        .into_new(Utc::now().date_naive());

    if let Err(source) = store.insert_invoice(&invoice).await {
        error!(error = ?source, customer_id = %invoice.customer_id, "failed to create invoice");
        return Err(ActionError::Database {
            message: "Database Error: Failed to Create Invoice.".to_string(),
            source,
        });
    }

    info!(
        customer_id = %invoice.customer_id,
        amount_cents = invoice.amount_cents,
        status = %invoice.status,
        date = %invoice.date,
        "created invoice"
    );

    cache.revalidate_path(INVOICES_PATH);
    Ok(Redirected { to: INVOICES_PATH })
}

pub async fn update_invoice(
    store: &dyn InvoiceStore,
    cache: &RouteCache,
    id: &str,
    form: &InvoiceForm,
) -> Result<Redirected, ActionError> {
    let changes = validated(form, "Missing Fields. Failed to Update Invoice.")?.into_changes();

    match store.update_invoice(id, &changes).await {
        Ok(0) => warn!(invoice_id = id, "update matched no invoice"),
        Ok(_) => info!(
            invoice_id = id,
            customer_id = %changes.customer_id,
            amount_cents = changes.amount_cents,
            status = %changes.status,
            "updated invoice"
        ),
        Err(source) => {
            error!(error = ?source, invoice_id = id, "failed to update invoice");
            return Err(ActionError::Database {
                message: "Database Error: Failed to Update Invoice.".to_string(),
                source,
            });
        }
    }

    cache.revalidate_path(INVOICES_PATH);
    Ok(Redirected { to: INVOICES_PATH })
}

/// Delete an invoice. The caller is already on the listing, so this
/// returns a confirmation instead of redirecting.
pub async fn delete_invoice(
    store: &dyn InvoiceStore,
    cache: &RouteCache,
    id: &str,
) -> Result<FormState, ActionError> {
    match store.delete_invoice(id).await {
        Ok(0) => warn!(invoice_id = id, "delete matched no invoice"),
        Ok(_) => info!(invoice_id = id, "deleted invoice"),
        Err(source) => {
            error!(error = ?source, invoice_id = id, "failed to delete invoice");
            return Err(ActionError::Database {
                message: "Database Error: Failed to Delete Invoice.".to_string(),
                source,
            });
        }
    }

    cache.revalidate_path(INVOICES_PATH);
    Ok(FormState::message("Deleted Invoice."))
}
