//! Repository for the `posts` table.

use murmur_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use murmur_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostDetail, UpdatePost};

/// Column list shared across `posts` queries to avoid repetition.
const COLUMNS: &str = "id, author_id, title, content, created_at, updated_at";

/// Read-model query: posts joined with the author's username plus comment
/// and like counts.
const DETAIL_VIEW: &str = "SELECT p.id, p.author_id, u.username AS author_username, \
     p.title, p.content, \
     (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count, \
     (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes_count, \
     p.created_at, p.updated_at \
     FROM posts p JOIN users u ON u.id = p.author_id";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    ///
    /// The author is fixed at creation; no update path changes it.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (author_id, title, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(author_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a post by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the detail read-model for a single post.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<PostDetail>, sqlx::Error> {
        let query = format!("{DETAIL_VIEW} WHERE p.id = $1");
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all posts, newest first, with stable id tie-breaking.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PostDetail>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "{DETAIL_VIEW} ORDER BY p.created_at DESC, p.id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List posts authored by any of `author_ids`, newest first, with stable
    /// id tie-breaking. An empty author list yields an empty result.
    ///
    /// This is the feed's content read: callers pass the follow set from
    /// [`FollowRepo::list_following`](crate::repositories::FollowRepo::list_following).
    pub async fn list_by_authors(
        pool: &PgPool,
        author_ids: &[DbId],
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PostDetail>, sqlx::Error> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "{DETAIL_VIEW} WHERE p.author_id = ANY($1) \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(author_ids)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a post's title/content. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post. Returns `true` if a row was removed.
    ///
    /// Comments and likes referencing the post are removed by `ON DELETE
    /// CASCADE`; notifications survive (the sink is append-only).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
