//! Post entity model, DTOs, and feed read-model.

use murmur_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A post row from the `posts` table.
///
/// `author_id` is immutable after creation: there is no update path for it
/// in [`PostRepo`](crate::repositories::PostRepo).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Post read-model for listings and the feed: the row joined with the
/// author's username and comment/like counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostDetail {
    pub id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub title: String,
    pub content: String,
    pub comments_count: i64,
    pub likes_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new post. The author comes from the authenticated
/// request identity, never from the body.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
}

/// DTO for updating an existing post. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
}
