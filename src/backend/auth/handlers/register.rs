/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /api/users/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Check that neither the username nor the email is taken
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Return the public profile
 *
 * Registration does not log the user in; the client calls login next.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::server::state::AppState;
use crate::shared::validation::{validate_email, validate_password, validate_username};
use crate::shared::PublicUser;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid username, email or password, or a duplicate
///   username or email
/// * `500 Internal Server Error` - Hashing or store failure
///
/// # Example Request
///
/// ```http
/// POST /api/users/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), BackendError> {
    tracing::info!("Register request for username: {}, email: {}", request.username, request.email);

    let username = request.username.trim();
    let email = request.email.trim().to_lowercase();

    validate_username(username)?;
    validate_email(&email)?;
    validate_password(&request.password)?;

    if get_user_by_username(&state.db, username).await?.is_some() {
        tracing::warn!("Username already exists: {}", username);
        return Err(BackendError::duplicate("Username already taken"));
    }

    if get_user_by_email(&state.db, &email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::duplicate("Email already registered"));
    }

    let password_hash = hash_password(request.password, state.config.bcrypt_cost).await?;

    // A concurrent registration can still win the race to the UNIQUE index
    let user = create_user(&state.db, username, &email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::duplicate("Username or email already registered")
            } else {
                BackendError::from(e)
            }
        })?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok((StatusCode::CREATED, Json(user.to_public())))
}
