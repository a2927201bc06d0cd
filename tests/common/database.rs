//! Test application fixture
//!
//! Every `TestApp` owns its own in-memory SQLite database, so tests never
//! share state and need no cleanup.

use axum_test::TestServer;
use messenger::backend::server::config::{load_database, ServerConfig};
use messenger::backend::server::create_app_with_pool;
use sqlx::SqlitePool;

/// Test application fixture
///
/// Holds the server under test and a handle on its pool for seeding or
/// inspecting rows directly.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub config: ServerConfig,
}

impl TestApp {
    /// Create a new application over a fresh, migrated database
    pub async fn new() -> Self {
        let config = ServerConfig::in_memory();
        let pool = load_database(&config)
            .await
            .expect("Failed to open test database");

        let app = create_app_with_pool(pool.clone(), config.clone());
        let server = TestServer::new(app).expect("Failed to start test server");

        Self { server, pool, config }
    }

    /// Count rows in a table
    pub async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows");
        count
    }
}
