//! Unread counts
//!
//! Counts are derived from the `read` flag every time they are asked for;
//! nothing is cached.

use uuid::Uuid;

use super::conversation::Conversation;
use super::message::ChatMessage;

/// Unread messages in a conversation that were addressed to `viewer_id`
pub fn count_unread(conversation: &Conversation, viewer_id: Uuid) -> usize {
    count_unread_in(&conversation.messages, viewer_id)
}

pub fn count_unread_in(messages: &[ChatMessage], viewer_id: Uuid) -> usize {
    messages
        .iter()
        .filter(|message| message.is_unread_for(viewer_id))
        .count()
}
