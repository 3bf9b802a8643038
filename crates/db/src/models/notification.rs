//! Notification entity model and read-model.

use murmur_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
///
/// Rows are append-only: created exclusively as a side effect of engagement
/// actions (like, comment, follow) and never updated afterwards except for
/// the read flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub actor_id: DbId,
    pub verb: String,
    pub target_type: Option<String>,
    pub target_id: Option<DbId>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Notification read-model: the row joined with the actor's username for
/// display in the notification list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationDetail {
    pub id: DbId,
    pub actor_id: DbId,
    pub actor_username: String,
    pub verb: String,
    pub target_type: Option<String>,
    pub target_id: Option<DbId>,
    pub is_read: bool,
    pub created_at: Timestamp,
}
