//! Brickline intake server entry point.
//!
//! Opens the storage backend (creating the registrations table when the
//! schema is ensured at startup), then starts the Axum HTTP server with
//! graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use brickline_core::{IntakeService, SchemaMode};
use brickline_server::config::{ServerConfig, StorageBackendType};
use brickline_server::routes;
use brickline_server::state::AppState;
use brickline_storage::{MemoryStore, RegistrationStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        storage = ?storage_kind(&config.storage_backend),
        schema_mode = %config.schema_mode,
        "Brickline intake starting"
    );

    let store = open_store(&config).await?;
    let state = Arc::new(AppState {
        intake: IntakeService::new(store, config.schema_mode),
    });

    let app = routes::build_router(state, &config);

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Brickline intake listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Brickline intake stopped");
    Ok(())
}

fn storage_kind(backend: &StorageBackendType) -> &'static str {
    match backend {
        StorageBackendType::Memory => "memory",
        StorageBackendType::Postgres { .. } => "postgres",
    }
}

/// Open the configured store and, in startup mode, ensure the table once.
async fn open_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn RegistrationStore>> {
    let store: Arc<dyn RegistrationStore> = match &config.storage_backend {
        StorageBackendType::Memory => {
            info!("using in-memory storage (registrations will not persist)");
            Arc::new(MemoryStore::new())
        }
        #[cfg(feature = "postgres-backend")]
        StorageBackendType::Postgres {
            url,
            max_connections,
        } => {
            info!(url = %"[redacted]", max_connections, "using PostgreSQL storage");
            Arc::new(
                brickline_storage::PostgresStore::connect(url, *max_connections)
                    .await
                    .context("failed to connect to PostgreSQL storage")?,
            )
        }
        #[cfg(not(feature = "postgres-backend"))]
        StorageBackendType::Postgres { .. } => {
            anyhow::bail!(
                "PostgreSQL backend requested but feature 'postgres-backend' is not enabled"
            );
        }
    };

    if config.schema_mode == SchemaMode::Startup {
        store
            .ensure_schema()
            .await
            .context("failed to ensure registrations table")?;
        info!("registrations table ready");
    }

    Ok(store)
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
