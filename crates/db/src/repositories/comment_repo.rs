//! Repository for the `comments` table.

use murmur_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::comment::{Comment, CommentDetail};

/// Column list shared across `comments` queries to avoid repetition.
const COLUMNS: &str = "id, post_id, author_id, content, created_at, updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    ///
    /// Runs on a caller-owned connection so the "commented on your post"
    /// notification commits together with the comment.
    pub async fn create(
        conn: &mut PgConnection,
        post_id: DbId,
        author_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (post_id, author_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a comment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a post's comments, oldest first, joined with author usernames.
    pub async fn list_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<CommentDetail>, sqlx::Error> {
        sqlx::query_as::<_, CommentDetail>(
            "SELECT c.id, c.post_id, c.author_id, u.username AS author_username, \
             c.content, c.created_at, c.updated_at \
             FROM comments c JOIN users u ON u.id = c.author_id \
             WHERE c.post_id = $1 \
             ORDER BY c.created_at ASC, c.id ASC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }

    /// Delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
