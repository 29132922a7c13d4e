use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use invoice_dashboard::config;
use invoice_dashboard::db::{self, InvoiceStore, MemoryStore};
use invoice_dashboard::web::{self, AppState};

/// Invoice dashboard form actions server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Address to listen on, overriding BIND_ADDRESS
    #[arg(long)]
    bind: Option<String>,

    /// Keep invoices in memory instead of connecting to Postgres
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = config::init()?;

    let store: Arc<dyn InvoiceStore> = if cli.in_memory {
        info!("Using in-memory invoice store");
        Arc::new(MemoryStore::new())
    } else {
        let db = db::init(&config).await?;
        info!("Database connection established");
        Arc::new(db)
    };

    let bind_address = cli.bind.unwrap_or(config.bind_address);
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    info!(address = %bind_address, "Invoice dashboard listening");

    axum::serve(listener, web::router(AppState::new(store))).await?;

    Ok(())
}
