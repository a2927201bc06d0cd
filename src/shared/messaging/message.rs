//! Chat Message Data Structure
//!
//! Represents a direct message between a sender and a receiver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a chat message
///
/// Rows are read with the sender's and receiver's usernames joined in, so
/// a message can be rendered without a second lookup. The only field that
/// ever changes after creation is `read`, and only from `false` to `true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct ChatMessage {
    /// Unique message ID
    pub id: Uuid,
    /// Message text
    pub content: String,
    /// Author of the message
    pub sender_id: Uuid,
    /// Addressee of the message
    pub receiver_id: Uuid,
    /// Whether the receiver has read the message
    pub read: bool,
    /// When the message was sent
    pub created_at: DateTime<Utc>,
    /// Sender's username, if the join resolved
    pub sender_username: Option<String>,
    /// Receiver's username, if the join resolved
    pub receiver_username: Option<String>,
}

impl ChatMessage {
    /// Create a new unread message
    pub fn new(sender_id: Uuid, receiver_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            content: content.into(),
            sender_id,
            receiver_id,
            read: false,
            created_at: Utc::now(),
            sender_username: None,
            receiver_username: None,
        }
    }

    /// The endpoint of this message that is not `viewer_id`
    ///
    /// A message a user sent to themselves has the viewer as its other party.
    pub fn other_party(&self, viewer_id: Uuid) -> Uuid {
        if self.sender_id == viewer_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }

    /// Username of the other party, if it was joined in
    pub fn other_party_username(&self, viewer_id: Uuid) -> Option<&str> {
        if self.sender_id == viewer_id {
            self.receiver_username.as_deref()
        } else {
            self.sender_username.as_deref()
        }
    }

    /// Whether the lowercased content contains `needle`
    ///
    /// `needle` must already be lowercased.
    pub fn content_contains(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
    }

    /// Whether this message still counts as unread for `viewer_id`
    pub fn is_unread_for(&self, viewer_id: Uuid) -> bool {
        !self.read && self.receiver_id == viewer_id
    }
}

/// Request to send a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    pub receiver_id: Uuid,
}
