/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the user
 * handlers (register, login, logout, profile).
 */

use serde::{Deserialize, Serialize};

use crate::shared::PublicUser;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

/// Login response
///
/// Contains the JWT token and the user's public profile.
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub user: PublicUser,
    pub token: String,
}

/// Profile update request
///
/// Absent fields keep their current value.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Plain acknowledgement body
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
