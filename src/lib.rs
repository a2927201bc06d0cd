//! Messenger - Main Library
//!
//! Messenger is a small direct-messaging backend: user registration and
//! login, one-to-one messages, and a contact/friend-request system served
//! as a JSON REST API.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types and pure logic
//!   - Messages, conversations, contacts, public user profiles
//!   - Conversation aggregation and unread counting
//!   - Contact state machine and input validation
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, bearer-token middleware
//!   - SQLite persistence through sqlx
//!   - Error taxonomy mapped onto HTTP responses
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use messenger::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
