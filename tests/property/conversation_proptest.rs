//! Property tests for conversation aggregation

use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use messenger::shared::{aggregate, merge_contacts, ChatMessage, PublicUser};
use proptest::prelude::*;
use uuid::Uuid;

const PEERS: usize = 5;

fn peers() -> Vec<Uuid> {
    (0..PEERS).map(|i| Uuid::from_u128(100 + i as u128)).collect()
}

fn viewer() -> Uuid {
    Uuid::from_u128(1)
}

/// (peer index, viewer is sender, read, seconds offset)
fn message_specs() -> impl Strategy<Value = Vec<(usize, bool, bool, i64)>> {
    prop::collection::vec((0..PEERS, any::<bool>(), any::<bool>(), 0i64..10_000), 0..40)
}

/// Build the viewer's messages newest first, as the store returns them
fn build_messages(specs: &[(usize, bool, bool, i64)]) -> Vec<ChatMessage> {
    let peers = peers();
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let mut messages: Vec<ChatMessage> = specs
        .iter()
        .enumerate()
        .map(|(i, &(peer, outgoing, read, offset))| {
            let (sender, receiver) = if outgoing {
                (viewer(), peers[peer])
            } else {
                (peers[peer], viewer())
            };
            let mut message = ChatMessage::new(sender, receiver, format!("message {}", i));
            message.read = read;
            message.created_at = base + Duration::seconds(offset);
            message.sender_username = Some(format!("user-{}", sender));
            message.receiver_username = Some(format!("user-{}", receiver));
            message
        })
        .collect();

    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    messages
}

proptest! {
    #[test]
    fn one_conversation_per_peer(specs in message_specs()) {
        let messages = build_messages(&specs);
        let conversations = aggregate(&messages, viewer());

        let ids: HashSet<Uuid> = conversations.iter().map(|c| c.conversation_id).collect();
        prop_assert_eq!(ids.len(), conversations.len());

        let expected: HashSet<Uuid> = messages.iter().map(|m| m.other_party(viewer())).collect();
        prop_assert_eq!(ids, expected);

        for conversation in &conversations {
            prop_assert!(conversation
                .messages
                .iter()
                .all(|m| m.other_party(viewer()) == conversation.conversation_id));
        }
    }

    #[test]
    fn every_message_lands_once(specs in message_specs()) {
        let messages = build_messages(&specs);
        let conversations = aggregate(&messages, viewer());

        let total: usize = conversations.iter().map(|c| c.messages.len()).sum();
        prop_assert_eq!(total, messages.len());
    }

    #[test]
    fn sorted_newest_first(specs in message_specs()) {
        let messages = build_messages(&specs);
        let conversations = aggregate(&messages, viewer());

        for pair in conversations.windows(2) {
            prop_assert!(pair[0].last_activity() >= pair[1].last_activity());
        }
    }

    #[test]
    fn unread_counts_only_received(specs in message_specs()) {
        let messages = build_messages(&specs);
        let conversations = aggregate(&messages, viewer());

        for conversation in &conversations {
            let expected = conversation
                .messages
                .iter()
                .filter(|m| !m.read && m.receiver_id == viewer())
                .count();
            prop_assert_eq!(conversation.unread_count, expected);
            prop_assert!(conversation.unread_count <= conversation.messages.len());
        }
    }

    #[test]
    fn input_is_not_modified(specs in message_specs()) {
        let messages = build_messages(&specs);
        let before = messages.clone();

        let _ = aggregate(&messages, viewer());
        prop_assert_eq!(messages, before);
    }

    #[test]
    fn merged_contacts_trail_active_conversations(
        specs in message_specs(),
        contact_mask in prop::collection::vec(any::<bool>(), PEERS),
    ) {
        let messages = build_messages(&specs);
        let contacts: Vec<PublicUser> = peers()
            .into_iter()
            .zip(contact_mask)
            .filter(|(_, is_contact)| *is_contact)
            .map(|(id, _)| PublicUser {
                id,
                username: format!("user-{}", id),
                email: format!("{}@example.com", id),
            })
            .collect();

        let active = aggregate(&messages, viewer());
        let active_len = active.len();
        let merged = merge_contacts(active, &contacts);

        let ids: HashSet<Uuid> = merged.iter().map(|c| c.conversation_id).collect();
        prop_assert_eq!(ids.len(), merged.len());
        for contact in &contacts {
            prop_assert!(ids.contains(&contact.id));
        }

        let first_empty = merged.iter().position(|c| c.messages.is_empty()).unwrap_or(merged.len());
        prop_assert_eq!(first_empty, active_len);
        prop_assert!(merged[first_empty..].iter().all(|c| c.messages.is_empty() && c.unread_count == 0));
    }
}
