//! Conversation aggregation
//!
//! A conversation is never stored. It is recomputed from the flat list of
//! messages a user is involved in, grouped by the other party.
//!
//! # Ordering
//!
//! Messages are expected newest first, so the first message of each group
//! is the most recent one. Conversations are then sorted by that message's
//! timestamp, newest first. An empty conversation sorts as the Unix epoch
//! and therefore ends up last.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::ChatMessage;
use super::unread::count_unread_in;
use super::user::{OtherUser, PublicUser};

/// Messages exchanged with one other user, as seen by the viewer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Id of the other user
    pub conversation_id: Uuid,
    pub other_user: OtherUser,
    /// Messages in the order they were fed in (newest first)
    pub messages: Vec<ChatMessage>,
    /// Messages in this conversation still unread by the viewer
    pub unread_count: usize,
}

impl Conversation {
    /// Conversation with a contact that has no messages yet
    pub fn empty(user: &PublicUser) -> Self {
        Self {
            conversation_id: user.id,
            other_user: OtherUser::from(user),
            messages: Vec::new(),
            unread_count: 0,
        }
    }

    /// Most recent message, if any
    pub fn latest(&self) -> Option<&ChatMessage> {
        self.messages.first()
    }

    /// Timestamp used to order conversations
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.latest()
            .map(|message| message.created_at)
            .unwrap_or_default()
    }
}

/// Group `messages` into one conversation per other party of `viewer_id`
///
/// The input is borrowed and left untouched. Conversations are returned
/// newest first; ties keep the order in which each party first appeared.
pub fn aggregate(messages: &[ChatMessage], viewer_id: Uuid) -> Vec<Conversation> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut conversations: Vec<Conversation> = Vec::new();

    for message in messages {
        let other_id = message.other_party(viewer_id);

        let slot = *index.entry(other_id).or_insert_with(|| {
            let username = message.other_party_username(viewer_id).map(str::to_owned);
            if username.is_none() {
                tracing::warn!(user_id = %other_id, "Conversation partner username could not be resolved");
            }

            conversations.push(Conversation {
                conversation_id: other_id,
                other_user: OtherUser {
                    id: other_id,
                    username,
                },
                messages: Vec::new(),
                unread_count: 0,
            });
            conversations.len() - 1
        });

        conversations[slot].messages.push(message.clone());
    }

    for conversation in &mut conversations {
        conversation.unread_count = count_unread_in(&conversation.messages, viewer_id);
    }

    sort_by_recency(&mut conversations);
    conversations
}

/// Add an empty conversation for every contact that has none yet
///
/// Existing conversations are kept as they are. The result is re-sorted so
/// the empty conversations follow every conversation that has messages.
pub fn merge_contacts(
    mut conversations: Vec<Conversation>,
    contacts: &[PublicUser],
) -> Vec<Conversation> {
    for contact in contacts {
        if !conversations.iter().any(|c| c.conversation_id == contact.id) {
            conversations.push(Conversation::empty(contact));
        }
    }

    sort_by_recency(&mut conversations);
    conversations
}

fn sort_by_recency(conversations: &mut [Conversation]) {
    // sort_by is stable
    conversations.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
}
