//! Database operations for messaging
//!
//! This module contains database operations for direct messages and their
//! read flags. Every read query joins both usernames in so rows map straight
//! onto `ChatMessage`.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::messaging::ChatMessage;

const MESSAGE_SELECT: &str = r#"
    SELECT m.id, m.content, m.sender_id, m.receiver_id, m.read, m.created_at,
           s.username AS sender_username, r.username AS receiver_username
    FROM messages m
    LEFT JOIN users s ON s.id = m.sender_id
    LEFT JOIN users r ON r.id = m.receiver_id
"#;

/// Outcome of marking a single message read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkRead {
    /// The viewer is the receiver; the message is now read
    Marked,
    /// No message with this id
    Missing,
    /// The message exists but was sent to someone else
    NotReceiver,
}

/// Store a new unread message and return it with usernames joined in
pub async fn create_message(
    pool: &SqlitePool,
    sender_id: Uuid,
    receiver_id: Uuid,
    content: &str,
) -> Result<ChatMessage, sqlx::Error> {
    let id = Uuid::now_v7();

    sqlx::query(
        r#"
        INSERT INTO messages (id, content, sender_id, receiver_id, read, created_at)
        VALUES ($1, $2, $3, $4, 0, $5)
        "#,
    )
    .bind(id)
    .bind(content)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    get_message(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

pub async fn get_message(pool: &SqlitePool, id: Uuid) -> Result<Option<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(&format!("{MESSAGE_SELECT} WHERE m.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Every message the user sent or received, newest first
pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(&format!(
        r#"{MESSAGE_SELECT}
        WHERE m.sender_id = $1 OR m.receiver_id = $2
        ORDER BY m.created_at DESC, m.id DESC
        "#
    ))
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Messages exchanged between two users in both directions, oldest first
pub async fn list_between(
    pool: &SqlitePool,
    user_id: Uuid,
    peer_id: Uuid,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(&format!(
        r#"{MESSAGE_SELECT}
        WHERE (m.sender_id = $1 AND m.receiver_id = $2)
           OR (m.sender_id = $3 AND m.receiver_id = $4)
        ORDER BY m.created_at ASC, m.id ASC
        "#
    ))
    .bind(user_id)
    .bind(peer_id)
    .bind(peer_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring search over the user's messages, newest first
///
/// Both sides are folded with Unicode lowercasing in Rust. SQLite's
/// `lower()` and `LIKE` only fold ASCII, so the match is not done in SQL.
pub async fn search_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    query: &str,
    limit: usize,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let needle = query.to_lowercase();

    Ok(list_for_user(pool, user_id)
        .await?
        .into_iter()
        .filter(|message| message.content_contains(&needle))
        .take(limit)
        .collect())
}

/// Mark one message read, but only for its receiver
///
/// Re-marking an already read message still reports `Marked`.
pub async fn mark_read(
    pool: &SqlitePool,
    viewer_id: Uuid,
    message_id: Uuid,
) -> Result<MarkRead, sqlx::Error> {
    let result = sqlx::query("UPDATE messages SET read = 1 WHERE id = $1 AND receiver_id = $2")
        .bind(message_id)
        .bind(viewer_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        return Ok(MarkRead::Marked);
    }

    let exists: Option<(Uuid,)> = sqlx::query_as("SELECT receiver_id FROM messages WHERE id = $1")
        .bind(message_id)
        .fetch_optional(pool)
        .await?;

    Ok(match exists {
        Some(_) => MarkRead::NotReceiver,
        None => MarkRead::Missing,
    })
}

/// Mark every unread message from `peer_id` to `viewer_id` read
///
/// Returns how many messages changed.
pub async fn mark_conversation_read(
    pool: &SqlitePool,
    viewer_id: Uuid,
    peer_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE messages SET read = 1
        WHERE sender_id = $1 AND receiver_id = $2 AND read = 0
        "#,
    )
    .bind(peer_id)
    .bind(viewer_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Unread messages addressed to the user across all conversations
pub async fn count_unread_total(pool: &SqlitePool, viewer_id: Uuid) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND read = 0")
            .bind(viewer_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
