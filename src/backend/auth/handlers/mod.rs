//! User Handlers Module
//!
//! This module contains all HTTP handlers under `/api/users`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - Login and logout handlers
//! └── profile.rs   - Profile read and update handlers
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/users/register
//! - **`login`** - POST /api/users/login
//! - **`logout`** - POST /api/users/logout
//! - **`get_profile`** / **`put_profile`** - GET/PUT /api/users/profile/{id}
//!
//! Blocking a user lives with the contact handlers.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login and logout handlers
pub mod login;

/// Profile handlers
pub mod profile;

// Re-export commonly used types
pub use types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UpdateProfileRequest};

// Re-export handlers
pub use login::{login, logout};
pub use profile::{get_profile, put_profile};
pub use register::register;
