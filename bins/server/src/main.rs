//! Escola API Server
//!
//! Main entry point for the school backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use escola_api::{AppState, create_router};
use escola_core::storage::{BlobStore, StorageConfig};
use escola_db::migration::{Migrator, MigratorTrait};
use escola_db::{connect, documents};
use escola_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "escola=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Blob storage first: a missing container must stop startup before any
    // connection is opened.
    let storage_config =
        StorageConfig::from_settings(&config.storage).context("Invalid storage configuration")?;
    let storage = BlobStore::from_config(storage_config).context("Failed to open blob storage")?;
    info!(
        provider = storage.provider_name(),
        base_url = storage.base_url(),
        "Blob storage configured"
    );

    // Relational store
    let db = connect(&config.database)
        .await
        .context("Failed to connect to the relational store")?;
    info!(host = %config.database.host, database = %config.database.name, "Connected to database");

    if config.database.auto_migrate {
        Migrator::up(&db, None)
            .await
            .context("Failed to apply migrations")?;
        info!("Migrations applied");
    }

    // Document store
    let documents = documents::connect(&config.documents)
        .await
        .context("Failed to connect to the document store")?;

    let state = AppState {
        db: Arc::new(db),
        documents,
        storage: Arc::new(storage),
    };
    let shutdown_state = state.clone();

    // Create router
    let app = create_router(state, config.server.body_limit_bytes);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    close(shutdown_state).await;
    Ok(())
}

/// Release both store connections once the server has drained.
async fn close(state: AppState) {
    let AppState { db, documents, .. } = state;

    // Closing any handle closes the shared pool.
    if let Err(e) = (*db).clone().close().await {
        error!(error = %e, "Failed to close database pool");
    }

    documents.client().clone().shutdown().await;
    info!("Connections closed");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
