//! HTTP handlers for the invoice dashboard

use axum::Form;
use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::{debug, error};

use super::AppState;
use crate::actions::{self, ActionError, FormState, INVOICES_PATH, InvoiceForm, Redirected};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Invoice listing, served from the route cache until a mutation revalidates it
pub async fn list_invoices(State(state): State<AppState>) -> Response {
    let store = state.store.clone();
    let rendered = state
        .cache
        .get_or_render(INVOICES_PATH, || async move {
            let invoices = store.list_invoices().await?;
            Ok::<_, anyhow::Error>(serde_json::to_string(&invoices)?)
        })
        .await;

    match rendered {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!(error = ?e, "failed to fetch invoices");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FormState::message("Database Error: Failed to Fetch Invoices.")),
            )
                .into_response()
        }
    }
}

type FormPairs = Result<Form<Vec<(String, String)>>, FormRejection>;

/// An unreadable body (wrong content type, bad encoding) is treated as an
/// empty form so the caller still gets field errors.
fn invoice_form(body: FormPairs) -> InvoiceForm {
    match body {
        Ok(Form(pairs)) => InvoiceForm::from_pairs(pairs),
        Err(rejection) => {
            debug!(%rejection, "unreadable invoice form body");
            InvoiceForm::default()
        }
    }
}

pub async fn create_invoice(
    State(state): State<AppState>,
    body: FormPairs,
) -> Result<Redirected, ActionError> {
    let form = invoice_form(body);
    actions::create_invoice(state.store.as_ref(), &state.cache, &form).await
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: FormPairs,
) -> Result<Redirected, ActionError> {
    let form = invoice_form(body);
    actions::update_invoice(state.store.as_ref(), &state.cache, &id, &form).await
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormState>, ActionError> {
    actions::delete_invoice(state.store.as_ref(), &state.cache, &id)
        .await
        .map(Json)
}
