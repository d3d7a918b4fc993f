use anyhow::Result;
use std::sync::Arc;

use stroydom_backend::config::{self, StorageBackend};
use stroydom_backend::services::{spawn_ledger_worker, LedgerClient, LedgerHandle};
use stroydom_backend::storage::{FileStore, MemoryStore, ProjectStore};
use stroydom_backend::{app, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting stroydom backend"
    );

    // Create project store
    let store: Arc<dyn ProjectStore> = match settings.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory project store");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => {
            tracing::info!(path = %settings.storage_file_path, "Using file project store");
            Arc::new(FileStore::new(settings.storage_file_path.clone()))
        }
    };

    // Create ledger sink (disabled when no webhook is configured)
    let ledger = match &settings.ledger_webhook_url {
        Some(url) => {
            let client = LedgerClient::new(
                url,
                settings.ledger_token.as_deref(),
                settings.ledger_timeout_seconds,
            )?;
            spawn_ledger_worker(client)
        }
        None => {
            tracing::info!("Ledger export disabled (LEDGER_WEBHOOK_URL not set)");
            LedgerHandle::disabled()
        }
    };

    // Create application state
    let state = app::AppState::new(store, settings.clone(), ledger);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
