//! Common test utilities and helpers
//!
//! This module provides shared utilities for the HTTP integration tests:
//! - An in-memory application fixture
//! - Helpers that register and log in users through the API
//! - Assertions on error responses

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod database;

// Re-export commonly used utilities
pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
