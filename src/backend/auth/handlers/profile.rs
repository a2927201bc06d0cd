/**
 * Profile Handlers
 *
 * GET and PUT /api/users/profile/{id}.
 *
 * Any authenticated user can read a profile; only the owner can change it.
 * Responses never include the password hash.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::backend::auth::handlers::types::{MessageResponse, UpdateProfileRequest};
use crate::backend::auth::users::{
    get_user_by_email, get_user_by_id, get_user_by_username, update_profile, UserProfile,
};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::validation::{validate_email, validate_username};

/// Get a user's profile
///
/// # Errors
///
/// * `404 Not Found` - If the user does not exist
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(_auth): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserProfile>, BackendError> {
    let user = get_user_by_id(&state.db, user_id).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", user_id);
        BackendError::not_found("User not found")
    })?;

    Ok(Json(user.to_profile()))
}

/// Update the caller's own profile
///
/// # Errors
///
/// * `403 Forbidden` - If `user_id` is not the caller
/// * `404 Not Found` - If the user does not exist
/// * `400 Bad Request` - Invalid fields, or username/email taken by someone else
pub async fn put_profile(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    if auth.user_id != user_id {
        tracing::warn!("User {} tried to update profile of {}", auth.user_id, user_id);
        return Err(BackendError::forbidden("Cannot update another user's profile"));
    }

    let current = get_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let username = match request.username {
        Some(username) => username.trim().to_string(),
        None => current.username.clone(),
    };
    let email = match request.email {
        Some(email) => email.trim().to_lowercase(),
        None => current.email.clone(),
    };

    validate_username(&username)?;
    validate_email(&email)?;

    if let Some(other) = get_user_by_username(&state.db, &username).await? {
        if other.id != user_id {
            return Err(BackendError::duplicate("Username already taken"));
        }
    }
    if let Some(other) = get_user_by_email(&state.db, &email).await? {
        if other.id != user_id {
            return Err(BackendError::duplicate("Email already registered"));
        }
    }

    update_profile(&state.db, user_id, &username, &email)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::duplicate("Username or email already registered")
            } else {
                BackendError::from(e)
            }
        })?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("Profile updated for user {}", user_id);

    Ok(Json(MessageResponse::new("Profile updated successfully")))
}
