//! Like entity model.

use murmur_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A like row from the `likes` table.
///
/// At most one row exists per `(user_id, post_id)` pair, enforced by the
/// `uq_likes_user_post` constraint. Existence is a boolean fact, not a
/// counter.
#[derive(Debug, Clone, FromRow)]
pub struct Like {
    pub id: DbId,
    pub user_id: DbId,
    pub post_id: DbId,
    pub created_at: Timestamp,
}
