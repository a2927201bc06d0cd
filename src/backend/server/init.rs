/**
 * Server Initialization
 *
 * This module builds the application: it opens the database, assembles
 * the state and hands it to the router.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool and run migrations
 * 2. Build `AppState` (pool, session keys, config)
 * 3. Create and configure the router
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated. Unlike a missing
/// optional service, the server cannot run without its store.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing messenger backend");

    let pool = load_database(&config).await?;
    let app = create_app_with_pool(pool, config);

    tracing::info!("Router configured");
    Ok(app)
}

/// Build the application around an already opened pool
pub fn create_app_with_pool(pool: SqlitePool, config: ServerConfig) -> Router<()> {
    create_router(AppState::new(pool, config))
}
