//! Shared Module
//!
//! This module contains the domain types and pure logic of the messenger.
//! Nothing in here touches the network; the database layer only borrows
//! the row types through `sqlx::FromRow`.
//!
//! # Overview
//!
//! - `messaging` - messages, conversations, contacts and unread tracking
//! - `validation` - username, email, password and content rules
//! - `error` - errors raised by the domain layer

/// Shared error types
pub mod error;

/// Input validation rules
pub mod validation;

/// Messaging domain: messages, conversations, contacts
pub mod messaging;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use messaging::{
    aggregate, count_unread, merge_contacts, ChatMessage, Contact, ContactAction, ContactEntry,
    ContactStatus, Conversation, OtherUser, PublicUser,
};
