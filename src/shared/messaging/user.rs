//! User projections
//!
//! Views of a user that are safe to put in a response. Neither type has a
//! password field, so a hash can never leak through them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of a user (id, username, email)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// The far end of a conversation as seen by the viewer
///
/// `username` is `None` when the joined user row could not be resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtherUser {
    pub id: Uuid,
    pub username: Option<String>,
}

impl From<&PublicUser> for OtherUser {
    fn from(user: &PublicUser) -> Self {
        Self {
            id: user.id,
            username: Some(user.username.clone()),
        }
    }
}
