//! Input validation rules
//!
//! Field checks shared by registration, profile updates and messaging.
//! Each check returns a `SharedError::ValidationError` naming the field.

use crate::shared::error::SharedError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum message length in characters
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn validate_username(username: &str) -> Result<(), SharedError> {
    let invalid = || {
        SharedError::validation(
            "username",
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        )
    };

    if username.len() < 3 || username.len() > 30 {
        return Err(invalid());
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(invalid()),
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Validate email format (basic check: one '@' with text on both sides and a dot in the domain)
pub fn validate_email(email: &str) -> Result<(), SharedError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid && !email.chars().any(char::is_whitespace) {
        Ok(())
    } else {
        Err(SharedError::validation("email", "Invalid email format"))
    }
}

pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Validate message content and return it trimmed
pub fn validate_content(content: &str) -> Result<&str, SharedError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation("content", "Message content cannot be empty"));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(SharedError::validation(
            "content",
            format!("Message content cannot exceed {} characters", MAX_MESSAGE_LEN),
        ));
    }
    Ok(trimmed)
}
