//! Contact HTTP Handlers
//!
//! Handlers under `/api/contacts`, plus `POST /api/users/block/{userId}`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::auth::handlers::MessageResponse;
use crate::backend::auth::users::user_exists;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{
    AddContactRequest, Contact, ContactAction, ContactEntry, ContactStatus, Transition,
};

/// Send a contact request
///
/// # Errors
///
/// * `400 Bad Request` - Requesting yourself, or a record for this pair exists
/// * `404 Not Found` - The target user does not exist
pub async fn add_contact(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<AddContactRequest>,
) -> Result<(StatusCode, Json<Contact>), BackendError> {
    let target_id = request.friend_id;

    if target_id == auth.user_id {
        return Err(BackendError::validation("Cannot add yourself as a contact"));
    }

    if !user_exists(&state.db, target_id).await? {
        tracing::warn!("Contact request to unknown user: {}", target_id);
        return Err(BackendError::not_found("User not found"));
    }

    let existing = db::status_between(&state.db, auth.user_id, target_id).await?;
    if let Err(reason) = ContactAction::Request.apply(existing) {
        tracing::warn!("Contact request {} -> {} refused: {}", auth.user_id, target_id, reason);
        return Err(BackendError::duplicate(match existing {
            Some(ContactStatus::Accepted) => "Already in your contacts",
            Some(ContactStatus::Blocked) => "You have blocked this user",
            _ => "Contact request already exists",
        }));
    }

    // A concurrent request for the same pair wins the insert
    let contact = db::send_request(&state.db, auth.user_id, target_id)
        .await?
        .ok_or_else(|| BackendError::duplicate("Contact request already exists"))?;

    tracing::info!("Contact request {} -> {}", auth.user_id, target_id);
    Ok((StatusCode::CREATED, Json(contact)))
}

/// List accepted contacts
pub async fn list_contacts(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<ContactEntry>>, BackendError> {
    Ok(Json(db::list_accepted(&pool, auth.user_id).await?))
}

/// List pending requests addressed to the caller
pub async fn list_pending(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<ContactEntry>>, BackendError> {
    Ok(Json(db::list_pending(&pool, auth.user_id).await?))
}

pub async fn list_blocked(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<ContactEntry>>, BackendError> {
    Ok(Json(db::list_blocked(&pool, auth.user_id).await?))
}

/// Check `action` against the incoming request `contact_id`
///
/// A record that is missing, addressed to someone else or not in a state
/// the action accepts is reported as not found.
async fn check_incoming(
    state: &AppState,
    target_id: Uuid,
    contact_id: Uuid,
    action: ContactAction,
) -> Result<Transition, BackendError> {
    let current = db::get_incoming(&state.db, target_id, contact_id)
        .await?
        .map(|contact| contact.status);

    action.apply(current).map_err(|reason| {
        tracing::warn!("Contact {} for user {}: {}", contact_id, target_id, reason);
        BackendError::not_found("Contact request not found")
    })
}

/// Accept a pending request addressed to the caller
///
/// # Errors
///
/// * `404 Not Found` - No pending request with this id is addressed to the caller
pub async fn accept_contact(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(contact_id): Path<Uuid>,
) -> Result<Json<Contact>, BackendError> {
    check_incoming(&state, auth.user_id, contact_id, ContactAction::Accept).await?;

    // The conditional update still guards against a concurrent accept or reject
    let contact = db::accept(&state.db, auth.user_id, contact_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Contact request not found"))?;

    tracing::info!("Contact request {} accepted by {}", contact_id, auth.user_id);
    Ok(Json(contact))
}

/// Reject (delete) a pending request addressed to the caller
pub async fn reject_contact(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(contact_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    check_incoming(&state, auth.user_id, contact_id, ContactAction::Reject).await?;

    if !db::reject(&state.db, auth.user_id, contact_id).await? {
        return Err(BackendError::not_found("Contact request not found"));
    }

    tracing::info!("Contact request {} rejected by {}", contact_id, auth.user_id);
    Ok(Json(MessageResponse::new("Contact request rejected")))
}

/// Block a user
///
/// # Errors
///
/// * `400 Bad Request` - Blocking yourself
/// * `404 Not Found` - The user does not exist
pub async fn block_user(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    if user_id == auth.user_id {
        return Err(BackendError::validation("Cannot block yourself"));
    }

    if !user_exists(&state.db, user_id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    let existing = db::status_between(&state.db, auth.user_id, user_id).await?;
    let transition = ContactAction::Block.apply(existing)?;

    db::block(&state.db, auth.user_id, user_id).await?;
    tracing::info!("User {} blocked {} ({:?} -> {:?})", auth.user_id, user_id, existing, transition);

    Ok(Json(MessageResponse::new("User blocked")))
}
