//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, global layers and fallback
//! - **`api_routes`** - Everything nested under `/api`
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint routes
//! ```
//!
//! # Authentication
//!
//! Only `/health`, `/api/users/register` and `/api/users/login` are public.
//! Every other API route goes through `auth_middleware`, which rejects a
//! missing or invalid bearer token with 401 before the handler runs.

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
