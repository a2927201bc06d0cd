//! Authentication Module
//!
//! This module handles user registration, login and session management.
//! It provides HTTP handlers for the user endpoints and manages user rows
//! and JWT tokens.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`password`** - bcrypt hashing off the async runtime
//! - **`handlers`** - HTTP handlers for the user endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! ├── password.rs     - Password hashing
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email and password → user created → public profile returned
//! 2. **Login**: email and password → credentials verified → user marked online → JWT returned
//! 3. **Protected routes**: bearer token → verified by the auth middleware → `AuthUser` extracted
//! 4. **Logout**: user marked offline
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Tokens expire after `TOKEN_TTL_HOURS` (24 by default)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod password;

/// HTTP handlers for user endpoints
pub mod handlers;

pub use sessions::{Claims, SessionKeys};
pub use users::{User, UserProfile};
