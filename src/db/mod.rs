mod memory;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::models::{Invoice, InvoiceChanges, NewInvoice};

pub use memory::MemoryStore;

/// Persistence operations needed by the invoice actions.
///
/// Each method runs exactly one statement. `update_invoice` and
/// `delete_invoice` report how many rows were affected.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<()>;

    async fn update_invoice(&self, id: &str, changes: &InvoiceChanges) -> Result<u64>;

    async fn delete_invoice(&self, id: &str) -> Result<u64>;

    async fn list_invoices(&self) -> Result<Vec<Invoice>>;
}

/// Database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(config.database_url()?)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}

// Ids are uuid columns; bound strings are cast so a malformed id surfaces as a statement error.
#[async_trait]
impl InvoiceStore for Database {
    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1::uuid, $2, $3, $4)
            "#,
        )
        .bind(&invoice.customer_id)
        .bind(invoice.amount_cents)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(self.get_pool())
        .await?;

        Ok(())
    }

    async fn update_invoice(&self, id: &str, changes: &InvoiceChanges) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = $1::uuid, amount = $2, status = $3
            WHERE id = $4::uuid
            "#,
        )
        .bind(&changes.customer_id)
        .bind(changes.amount_cents)
        .bind(changes.status.as_str())
        .bind(id)
        .execute(self.get_pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_invoice(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1::uuid")
            .bind(id)
            .execute(self.get_pool())
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT
                id::text AS id,
                customer_id::text AS customer_id,
                amount::bigint AS amount,
                status,
                date
            FROM invoices
            ORDER BY date DESC
            "#,
        )
        .fetch_all(self.get_pool())
        .await?;

        Ok(invoices)
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    Ok(db)
}
