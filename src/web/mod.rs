mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::actions::INVOICES_PATH;
use crate::cache::RouteCache;
use crate::db::InvoiceStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InvoiceStore>,
    pub cache: Arc<RouteCache>,
}

impl AppState {
    pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
        Self {
            store,
            cache: Arc::new(RouteCache::new()),
        }
    }
}

/// Build the HTTP router for the invoice dashboard
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            INVOICES_PATH,
            get(handlers::list_invoices).post(handlers::create_invoice),
        )
        .route(
            "/dashboard/invoices/{id}",
            post(handlers::update_invoice).delete(handlers::delete_invoice),
        )
        .route("/dashboard/invoices/{id}/delete", post(handlers::delete_invoice))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
