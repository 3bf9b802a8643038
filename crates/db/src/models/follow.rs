//! Follow edge model.

use murmur_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A directed follow edge from the `follows` table.
///
/// Asymmetric: A following B says nothing about B following A. The pair is
/// the primary key, so edges have set semantics, and a CHECK constraint
/// rejects self-follows at the schema level as a backstop to the handler
/// validation.
#[derive(Debug, Clone, FromRow)]
pub struct Follow {
    pub follower_id: DbId,
    pub followed_id: DbId,
    pub created_at: Timestamp,
}
