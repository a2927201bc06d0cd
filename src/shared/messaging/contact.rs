//! Contact Data Structures
//!
//! A contact is a directed record: `user_id` sent the request, `friend_id`
//! received it. The relationship moves through a small state machine:
//!
//! ```text
//!            request            accept
//!   (none) ---------> pending ---------> accepted
//!     ^                  |
//!     +----- reject -----+
//!
//!   (none) | pending | accepted | blocked --block--> blocked
//! ```
//!
//! Rejecting deletes the record, so the pair can request again later.
//! Blocking is one-way; there is no unblock.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::PublicUser;
use crate::shared::error::SharedError;

/// Relationship status stored on a contact record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ContactStatus {
    Pending,
    Accepted,
    Blocked,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Accepted => "accepted",
            ContactStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something a user can do to a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    Request,
    Accept,
    Reject,
    Block,
}

impl fmt::Display for ContactAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            ContactAction::Request => "request",
            ContactAction::Accept => "accept",
            ContactAction::Reject => "reject",
            ContactAction::Block => "block",
        };
        f.write_str(word)
    }
}

/// Result of applying an action to a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The record ends up in this state (created if it did not exist)
    To(ContactStatus),
    /// The record is deleted
    Remove,
}

impl ContactAction {
    /// Apply this action to the current state of a relationship
    ///
    /// `current` is `None` when no record exists for the pair.
    pub fn apply(self, current: Option<ContactStatus>) -> Result<Transition, SharedError> {
        use ContactStatus::*;

        match (self, current) {
            (ContactAction::Request, None) => Ok(Transition::To(Pending)),
            (ContactAction::Accept, Some(Pending)) => Ok(Transition::To(Accepted)),
            (ContactAction::Reject, Some(Pending)) => Ok(Transition::Remove),
            (ContactAction::Block, _) => Ok(Transition::To(Blocked)),
            (action, from) => Err(SharedError::invalid_transition(from, action)),
        }
    }
}

/// A directed contact record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    /// The requester (or blocker)
    pub user_id: Uuid,
    /// The target of the request (or the blocked user)
    pub friend_id: Uuid,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A contact record together with the public profile of the other user
///
/// For accepted and blocked lists `peer` is the target; for pending
/// requests it is the requester.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactEntry {
    #[serde(flatten)]
    pub contact: Contact,
    pub peer: PublicUser,
}

/// Request body for adding a contact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContactRequest {
    pub friend_id: Uuid,
}
