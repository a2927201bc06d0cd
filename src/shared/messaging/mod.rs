//! Messaging Module
//!
//! This module contains all the data structures for the messaging system:
//!
//! - `ChatMessage` - A direct message between two users
//! - `Conversation` - Messages grouped by the other party, derived on demand
//! - `Contact` - A directed relationship record with a status
//! - `PublicUser` / `OtherUser` - User projections that never carry a password hash
//!
//! # Usage
//!
//! ```rust
//! use messenger::shared::messaging::{aggregate, ChatMessage, Conversation};
//! ```

pub mod user;
pub mod message;
pub mod conversation;
pub mod contact;
pub mod unread;

// Re-export all types
pub use user::{OtherUser, PublicUser};
pub use message::{ChatMessage, SendMessageRequest};
pub use conversation::{aggregate, merge_contacts, Conversation};
pub use contact::{AddContactRequest, Contact, ContactAction, ContactEntry, ContactStatus, Transition};
pub use unread::{count_unread, count_unread_in};
