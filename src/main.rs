//! Account Ledger Service - Main Application Entry Point
//!
//! A REST API for registering accounts by document number and posting
//! purchases, withdrawals and payments against them. Debits are stored as
//! negative amounts and credits as positive ones.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Services**: constructed once here with their stores injected
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Initialize logging
//! 3. Create database connection pool and run migrations
//! 4. Wire stores into services and build the HTTP router
//! 5. Serve until SIGINT/SIGTERM, then drain in-flight requests

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod repositories;
mod services;

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::{
    handlers::AppState,
    repositories::postgres::{PgAccountStore, PgOperationCatalog, PgTransactionStore},
    services::{AccountService, TransactionService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::from_env()?;

    init_tracing(&config);
    tracing::info!(environment = %config.environment, "Configuration loaded");

    let pool = db::create_pool(&config.database_url()?, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let accounts = Arc::new(PgAccountStore::new(pool.clone()));
    let transactions = Arc::new(PgTransactionStore::new(pool.clone()));
    let operations = Arc::new(PgOperationCatalog::new(pool.clone()));

    let state = AppState {
        accounts: AccountService::new(accounts.clone()),
        transactions: TransactionService::new(accounts, transactions, operations),
        pool: pool.clone(),
    };
    let app = handlers::router(state, config.request_timeout());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Reads `RUST_LOG`, falling back to the configured level. Production emits JSON lines.
fn init_tracing(config: &config::Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
