use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use super::validation::FieldErrors;

/// Failure outcome of an invoice action. Both kinds are scoped to the
/// request that produced them.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Input was malformed; nothing was sent to the database
    #[error("{message}")]
    Validation { errors: FieldErrors, message: String },

    /// The statement failed. `source` is logged, never sent to the client.
    #[error("{message}")]
    Database {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Body returned to the form when an action does not redirect
#[derive(Debug, Serialize, PartialEq)]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }
}

impl ActionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ActionError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_form_state(&self) -> FormState {
        match self {
            ActionError::Validation { errors, message } => FormState {
                errors: Some(errors.clone()),
                message: Some(message.clone()),
            },
            ActionError::Database { message, .. } => FormState::message(message.clone()),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_form_state())).into_response()
    }
}
