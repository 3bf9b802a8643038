//! Comment entity model and DTOs.

use murmur_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Comment read-model: the row joined with the author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentDetail {
    pub id: DbId,
    pub post_id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new comment. Post and author come from the URL and
/// the authenticated identity respectively.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub content: String,
}
