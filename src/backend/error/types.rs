/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * Errors caused by the request itself. Their message is sent back as-is:
 * - `Validation` / `Duplicate` - 400 Bad Request
 * - `Unauthorized` - 401, missing or bad credentials
 * - `Forbidden` - 403, authenticated but not allowed
 * - `NotFound` - 404
 *
 * ## Server Errors
 *
 * Store and hashing failures. They are logged in full and answered with a
 * generic "Internal server error" body:
 * - `Database` - any `sqlx::Error`
 * - `Internal` - everything else (bcrypt, token signing)
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Message sent to clients for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// Each variant maps to exactly one HTTP status code.
///
/// # Usage
///
/// ```rust
/// use messenger::backend::error::BackendError;
///
/// let err = BackendError::not_found("User not found");
/// let err = BackendError::duplicate("Contact request already exists");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Input that fails a validation rule
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// A record that must be unique already exists
    #[error("Duplicate: {message}")]
    Duplicate {
        message: String,
    },

    /// The addressed record does not exist (or is not visible to the caller)
    #[error("Not found: {message}")]
    NotFound {
        message: String,
    },

    /// Missing, malformed or expired credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// The caller is authenticated but may not perform the action
    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
    },

    /// Shared error (from shared module)
    ///
    /// Validation and transition errors raised by the domain layer.
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    /// Create a new internal error
    ///
    /// The message is only logged, never sent to the client.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `Duplicate`, `SharedError` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Database`, `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Duplicate { .. } => StatusCode::BAD_REQUEST,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            },
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Duplicate { message }
            | Self::NotFound { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message } => message.clone(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Database(_) | Self::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether this error is a server-side failure
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// Whether a store error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
