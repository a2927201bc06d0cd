/**
 * Login and Logout Handlers
 *
 * POST /api/users/login and POST /api/users/logout.
 *
 * # Authentication Process
 *
 * 1. Look up user by email (404 when unknown)
 * 2. Verify password using bcrypt (401 when wrong)
 * 3. Mark the user online
 * 4. Generate JWT token and return it with the public profile
 *
 * Logout marks the user offline. Tokens are stateless, so an issued token
 * stays valid until it expires.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse, MessageResponse};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::users::{get_user_by_email, set_online};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `404 Not Found` - No user with this email
/// * `401 Unauthorized` - Wrong password
/// * `500 Internal Server Error` - Store, hashing or token failure
///
/// # Example Response
///
/// ```json
/// {
///   "user": { "id": "0190...", "username": "alice", "email": "alice@example.com" },
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, BackendError> {
    let email = request.email.trim().to_lowercase();
    tracing::info!("Login request for: {}", email);

    let user = get_user_by_email(&state.db, &email).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", email);
        BackendError::not_found("User not found")
    })?;

    let valid = verify_password(request.password, user.password_hash.clone()).await?;
    if !valid {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::unauthorized("Incorrect password"));
    }

    set_online(&state.db, user.id, true).await?;

    let token = state
        .sessions
        .create_token(user.id, &user.email)
        .map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            BackendError::internal(format!("Failed to create token: {}", e))
        })?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(LoginResponse {
        user: user.to_public(),
        token,
    }))
}

/// Logout handler
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    set_online(&state.db, auth.user_id, false).await?;
    tracing::info!("User logged out: {}", auth.email);

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
