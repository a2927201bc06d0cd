//! Messaging HTTP Handlers
//!
//! This module contains the HTTP handlers under `/api/messages`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db::{self, MarkRead};
use crate::backend::auth::handlers::MessageResponse;
use crate::backend::auth::users::user_exists;
use crate::backend::contacts::db as contacts_db;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{
    aggregate, merge_contacts, ChatMessage, Conversation, PublicUser, SendMessageRequest,
};
use crate::shared::validation::validate_content;

/// Most results a search returns
const SEARCH_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadAllResponse {
    pub message: String,
    pub updated: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

/// Send a direct message
///
/// # Errors
///
/// * `400 Bad Request` - Empty or oversized content
/// * `404 Not Found` - Unknown receiver
/// * `403 Forbidden` - The receiver has blocked the sender
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), BackendError> {
    let content = validate_content(&request.content)?;

    if !user_exists(&state.db, request.receiver_id).await? {
        tracing::warn!("Message to unknown user: {}", request.receiver_id);
        return Err(BackendError::not_found("Receiver not found"));
    }

    if contacts_db::has_blocked(&state.db, request.receiver_id, auth.user_id).await? {
        tracing::warn!("User {} is blocked by {}", auth.user_id, request.receiver_id);
        return Err(BackendError::forbidden("You cannot message this user"));
    }

    let message = db::create_message(&state.db, auth.user_id, request.receiver_id, content).await?;
    tracing::info!("Message {} sent {} -> {}", message.id, auth.user_id, request.receiver_id);

    Ok((StatusCode::CREATED, Json(message)))
}

/// Conversations for the caller, newest first
///
/// Accepted contacts without any messages are listed last as empty
/// conversations.
pub async fn recent_conversations(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Conversation>>, BackendError> {
    let messages = db::list_for_user(&state.db, auth.user_id).await?;
    let conversations = aggregate(&messages, auth.user_id);

    let contacts: Vec<PublicUser> = contacts_db::list_accepted(&state.db, auth.user_id)
        .await?
        .into_iter()
        .map(|entry| entry.peer)
        .collect();

    Ok(Json(merge_contacts(conversations, &contacts)))
}

/// Messages between the caller and one peer, oldest first
pub async fn conversation_with(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(peer_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    Ok(Json(db::list_between(&pool, auth.user_id, peer_id).await?))
}

/// Mark one message read
///
/// # Errors
///
/// * `404 Not Found` - No such message
/// * `403 Forbidden` - The caller is not the receiver
pub async fn mark_message_read(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(message_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    match db::mark_read(&state.db, auth.user_id, message_id).await? {
        MarkRead::Marked => Ok(Json(MessageResponse::new("Message marked as read"))),
        MarkRead::Missing => Err(BackendError::not_found("Message not found")),
        MarkRead::NotReceiver => {
            tracing::warn!("User {} tried to mark message {} read", auth.user_id, message_id);
            Err(BackendError::forbidden("Only the receiver can mark a message as read"))
        }
    }
}

/// Mark everything a sender sent to the caller read
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(sender_id): Path<Uuid>,
) -> Result<Json<ReadAllResponse>, BackendError> {
    let updated = db::mark_conversation_read(&state.db, auth.user_id, sender_id).await?;
    tracing::info!("Marked {} messages from {} read for {}", updated, sender_id, auth.user_id);

    Ok(Json(ReadAllResponse {
        message: "Messages marked as read".to_string(),
        updated,
    }))
}

pub async fn unread_count(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UnreadCountResponse>, BackendError> {
    let unread = db::count_unread_total(&pool, auth.user_id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// Search the caller's messages
///
/// # Errors
///
/// * `400 Bad Request` - Missing or blank `q`
pub async fn search_messages(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    let term = query.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(BackendError::validation("Search query cannot be empty"));
    }

    Ok(Json(db::search_for_user(&pool, auth.user_id, term, SEARCH_LIMIT).await?))
}
