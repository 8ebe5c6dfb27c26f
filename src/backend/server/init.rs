/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Select the storage driver from the configuration
 * 2. Initialize it (create or verify tables)
 * 3. Build the application state and the router
 *
 * A remote backend with missing tables is demoted to in-memory storage
 * during step 2. Any other initialization failure is logged and startup
 * continues: requests that touch storage fail with `500` until the backend
 * answers, and PostgreSQL creates its tables on the first one that
 * reaches it. Only a configuration the selector rejects stops startup.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::storage::{select_storage, StorageResult};

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> StorageResult<Router<()>> {
    tracing::info!("Initializing lead capture backend");

    let storage = select_storage(&config.storage)?;

    match storage.initialize_database().await {
        Ok(()) => tracing::info!("Storage ready ({} tier)", storage.tier()),
        Err(e) => tracing::error!(
            "Failed to initialize {} storage, serving anyway: {}",
            storage.tier(),
            e
        ),
    }

    let app_state = AppState::new(storage);
    let app = create_router(app_state, &config.static_dir);

    tracing::info!("Router configured, serving static files from {}", config.static_dir.display());
    Ok(app)
}
