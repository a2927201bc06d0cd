//! Database operations for contacts
//!
//! Every state change is a single conditional statement, so two requests
//! racing on the same record cannot both succeed:
//!
//! - request: `INSERT ... ON CONFLICT DO NOTHING`
//! - accept: `UPDATE ... WHERE status = 'pending'`
//! - reject: `DELETE ... WHERE status = 'pending'`
//! - block: `INSERT ... ON CONFLICT DO UPDATE` (upsert)

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::messaging::{Contact, ContactEntry, ContactStatus, PublicUser};

const CONTACT_COLUMNS: &str = "id, user_id, friend_id, status, created_at, updated_at";

/// Contact row joined with the other user's public profile
#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    user_id: Uuid,
    friend_id: Uuid,
    status: ContactStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    peer_id: Uuid,
    peer_username: String,
    peer_email: String,
}

impl From<ContactRow> for ContactEntry {
    fn from(row: ContactRow) -> Self {
        ContactEntry {
            contact: Contact {
                id: row.id,
                user_id: row.user_id,
                friend_id: row.friend_id,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            peer: PublicUser {
                id: row.peer_id,
                username: row.peer_username,
                email: row.peer_email,
            },
        }
    }
}

/// Create a pending request from `requester_id` to `target_id`
///
/// Returns `None` when a record for this exact ordered pair already exists.
pub async fn send_request(
    pool: &SqlitePool,
    requester_id: Uuid,
    target_id: Uuid,
) -> Result<Option<Contact>, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Contact>(&format!(
        r#"
        INSERT INTO contacts (id, user_id, friend_id, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, friend_id) DO NOTHING
        RETURNING {CONTACT_COLUMNS}
        "#
    ))
    .bind(Uuid::now_v7())
    .bind(requester_id)
    .bind(target_id)
    .bind(ContactStatus::Pending)
    .bind(now)
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// Accept a pending request addressed to `target_id`
///
/// Returns `None` if no pending record with this id is addressed to the
/// target, including when it was already accepted.
pub async fn accept(
    pool: &SqlitePool,
    target_id: Uuid,
    contact_id: Uuid,
) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(&format!(
        r#"
        UPDATE contacts
        SET status = $1, updated_at = $2
        WHERE id = $3 AND friend_id = $4 AND status = $5
        RETURNING {CONTACT_COLUMNS}
        "#
    ))
    .bind(ContactStatus::Accepted)
    .bind(Utc::now())
    .bind(contact_id)
    .bind(target_id)
    .bind(ContactStatus::Pending)
    .fetch_optional(pool)
    .await
}

/// Delete a pending request addressed to `target_id`
///
/// Returns whether a record was removed.
pub async fn reject(pool: &SqlitePool, target_id: Uuid, contact_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND friend_id = $2 AND status = $3")
        .bind(contact_id)
        .bind(target_id)
        .bind(ContactStatus::Pending)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Put the `(blocker_id, blocked_id)` record into the blocked state
///
/// Creates the record if needed. Blocking twice leaves one record.
pub async fn block(pool: &SqlitePool, blocker_id: Uuid, blocked_id: Uuid) -> Result<Contact, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Contact>(&format!(
        r#"
        INSERT INTO contacts (id, user_id, friend_id, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, friend_id)
        DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at
        RETURNING {CONTACT_COLUMNS}
        "#
    ))
    .bind(Uuid::now_v7())
    .bind(blocker_id)
    .bind(blocked_id)
    .bind(ContactStatus::Blocked)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Current status of the record `user_id -> friend_id`, if any
pub async fn status_between(
    pool: &SqlitePool,
    user_id: Uuid,
    friend_id: Uuid,
) -> Result<Option<ContactStatus>, sqlx::Error> {
    let row: Option<(ContactStatus,)> =
        sqlx::query_as("SELECT status FROM contacts WHERE user_id = $1 AND friend_id = $2")
            .bind(user_id)
            .bind(friend_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(status,)| status))
}

/// Contact record `contact_id` if it is addressed to `target_id`
pub async fn get_incoming(
    pool: &SqlitePool,
    target_id: Uuid,
    contact_id: Uuid,
) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1 AND friend_id = $2"
    ))
    .bind(contact_id)
    .bind(target_id)
    .fetch_optional(pool)
    .await
}

/// Whether `blocker_id` has blocked `blocked_id`
pub async fn has_blocked(pool: &SqlitePool, blocker_id: Uuid, blocked_id: Uuid) -> Result<bool, sqlx::Error> {
    Ok(status_between(pool, blocker_id, blocked_id).await? == Some(ContactStatus::Blocked))
}

/// Records created by `user_id` with `status`, joined with the target's profile
async fn list_outgoing(
    pool: &SqlitePool,
    user_id: Uuid,
    status: ContactStatus,
) -> Result<Vec<ContactEntry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ContactRow>(
        r#"
        SELECT c.id, c.user_id, c.friend_id, c.status, c.created_at, c.updated_at,
               u.id AS peer_id, u.username AS peer_username, u.email AS peer_email
        FROM contacts c
        INNER JOIN users u ON u.id = c.friend_id
        WHERE c.user_id = $1 AND c.status = $2
        ORDER BY u.username ASC
        "#,
    )
    .bind(user_id)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ContactEntry::from).collect())
}

/// Accepted contacts the user requested
pub async fn list_accepted(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<ContactEntry>, sqlx::Error> {
    list_outgoing(pool, user_id, ContactStatus::Accepted).await
}

/// Users the user has blocked
pub async fn list_blocked(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<ContactEntry>, sqlx::Error> {
    list_outgoing(pool, user_id, ContactStatus::Blocked).await
}

/// Pending requests addressed to the user, joined with the requester's profile
pub async fn list_pending(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<ContactEntry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ContactRow>(
        r#"
        SELECT c.id, c.user_id, c.friend_id, c.status, c.created_at, c.updated_at,
               u.id AS peer_id, u.username AS peer_username, u.email AS peer_email
        FROM contacts c
        INNER JOIN users u ON u.id = c.user_id
        WHERE c.friend_id = $1 AND c.status = $2
        ORDER BY c.created_at DESC, c.id DESC
        "#,
    )
    .bind(user_id)
    .bind(ContactStatus::Pending)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ContactEntry::from).collect())
}
