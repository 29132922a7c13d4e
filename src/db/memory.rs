use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use uuid::Uuid;

use super::InvoiceStore;
use crate::models::{Invoice, InvoiceChanges, NewInvoice};

/// In-memory invoice store for local runs and tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single invoice by id
    pub fn get(&self, id: &str) -> Option<Invoice> {
        self.invoices
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.invoices.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seed a row directly, bypassing the actions
    pub fn insert_row(&self, invoice: Invoice) -> Result<()> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        invoices.insert(invoice.id.clone(), invoice);
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<()> {
        self.insert_row(Invoice {
            id: Uuid::new_v4().to_string(),
            customer_id: invoice.customer_id.clone(),
            amount: invoice.amount_cents,
            status: invoice.status,
            date: invoice.date,
        })
    }

    async fn update_invoice(&self, id: &str, changes: &InvoiceChanges) -> Result<u64> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match invoices.get_mut(id) {
            Some(invoice) => {
                invoice.customer_id = changes.customer_id.clone();
                invoice.amount = changes.amount_cents;
                invoice.status = changes.status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_invoice(&self, id: &str) -> Result<u64> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(invoices.remove(id).map_or(0, |_| 1))
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut listed: Vec<Invoice> = invoices.values().cloned().collect();
        listed.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(listed)
    }
}
