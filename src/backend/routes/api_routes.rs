/**
 * API Route Handlers
 *
 * This module defines the routes nested under `/api`.
 *
 * # Routes
 *
 * ## Public
 * - `POST /users/register` - User registration
 * - `POST /users/login` - User login
 *
 * ## Authenticated (bearer token)
 * - `POST /users/logout`
 * - `GET|PUT /users/profile/{id}`
 * - `POST /users/block/{user_id}`
 * - `POST /messages`
 * - `GET /messages/recent`
 * - `GET /messages/with/{peer_id}`
 * - `GET /messages/unread-count`
 * - `GET /messages/search?q=`
 * - `PUT /messages/{message_id}/read`
 * - `PUT /messages/read-all/{sender_id}`
 * - `GET /contacts`, `GET /contacts/pending`, `GET /contacts/blocked`
 * - `POST /contacts/add`
 * - `PUT /contacts/accept/{contact_id}`, `PUT /contacts/reject/{contact_id}`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::handlers::{get_profile, login, logout, put_profile, register};
use crate::backend::contacts::{
    accept_contact, add_contact, block_user, list_blocked, list_contacts, list_pending,
    reject_contact,
};
use crate::backend::messaging::{
    conversation_with, mark_all_read, mark_message_read, recent_conversations, search_messages,
    send_message, unread_count,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Returns the router to be nested at `/api`. The auth middleware is applied
/// with `route_layer`, so it only runs for matched protected routes.
pub fn configure_api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login));

    let protected = Router::new()
        .route("/users/logout", post(logout))
        .route("/users/profile/{id}", get(get_profile).put(put_profile))
        .route("/users/block/{user_id}", post(block_user))
        .route("/messages", post(send_message))
        .route("/messages/recent", get(recent_conversations))
        .route("/messages/with/{peer_id}", get(conversation_with))
        .route("/messages/unread-count", get(unread_count))
        .route("/messages/search", get(search_messages))
        .route("/messages/{message_id}/read", put(mark_message_read))
        .route("/messages/read-all/{sender_id}", put(mark_all_read))
        .route("/contacts", get(list_contacts))
        .route("/contacts/add", post(add_contact))
        .route("/contacts/pending", get(list_pending))
        .route("/contacts/blocked", get(list_blocked))
        .route("/contacts/accept/{contact_id}", put(accept_contact))
        .route("/contacts/reject/{contact_id}", put(reject_contact))
        .route_layer(from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
