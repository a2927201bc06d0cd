/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * `FromRef` so read-only handlers can extract the pool on its own.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The SQLite connection pool
 * - The session keys used to sign and verify tokens
 * - The loaded server configuration
 *
 * Nothing in the state is mutable; every request talks to the store
 * through the pool.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // Query the store
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Token signing and verification keys
    pub sessions: Arc<SessionKeys>,

    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: ServerConfig) -> Self {
        let sessions = SessionKeys::new(&config.jwt_secret, config.token_ttl());
        Self {
            db,
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }
}

/// Implement FromRef for SqlitePool
///
/// This allows Axum handlers to extract the pool directly from `AppState`
/// using `State(SqlitePool)`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}
