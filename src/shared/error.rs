//! Shared Error Types
//!
//! This module defines the errors raised by the domain layer. The backend
//! converts them into HTTP responses; the domain layer itself never knows
//! about status codes.
//!
//! # Error Categories
//!
//! - `ValidationError` - Input that breaks a field rule
//! - `InvalidTransition` - A contact action applied to a state that forbids it
//!
//! # Usage
//!
//! ```rust
//! use messenger::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "Message content cannot be empty");
//! ```
use thiserror::Error;

use crate::shared::messaging::contact::{ContactAction, ContactStatus};

/// Errors raised by the domain layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A contact action is not allowed from the current relationship state
    ///
    /// `from` is `None` when no contact record exists yet.
    #[error("Cannot {action} a contact in state {}", .from.map(|s| s.as_str()).unwrap_or("none"))]
    InvalidTransition {
        /// Current relationship state
        from: Option<ContactStatus>,
        /// The rejected action
        action: ContactAction,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid transition error
    pub fn invalid_transition(from: Option<ContactStatus>, action: ContactAction) -> Self {
        Self::InvalidTransition { from, action }
    }
}
