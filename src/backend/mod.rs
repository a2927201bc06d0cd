//! Backend Module
//!
//! This module contains all server-side code for the messenger: an Axum
//! JSON API over a SQLite store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Users, passwords, JWT sessions and the user endpoints
//! - **`messaging`** - Direct messages, conversations and read tracking
//! - **`contacts`** - Contact requests, accepted contacts and blocking
//! - **`middleware`** - Bearer token authentication
//! - **`error`** - Backend error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Users and sessions
//! ├── messaging/      - Messages
//! ├── contacts/       - Contacts
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the connection pool, the session keys and the config.
//! It is immutable; all shared data lives in the store. Handlers pull the
//! authenticated user from the request with the `AuthUser` extractor.
//!
//! # Error Handling
//!
//! Handlers and store functions return `BackendError`, which maps each
//! variant to one status code and a `{"error", "status"}` body. Store
//! failures are logged and answered with a generic 500.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Direct messaging
pub mod messaging;

/// Contacts and blocking
pub mod contacts;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
