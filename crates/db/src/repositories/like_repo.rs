//! Repository for the `likes` table.

use murmur_core::types::DbId;
use sqlx::{PgConnection, PgPool};

/// Provides operations on likes.
///
/// A like is a boolean fact per `(user_id, post_id)` pair. The
/// `uq_likes_user_post` constraint plus `ON CONFLICT DO NOTHING` make the
/// check-then-act atomic: two concurrent like requests for the same pair
/// store exactly one row, and only the request that inserted it observes
/// `created = true`.
pub struct LikeRepo;

impl LikeRepo {
    /// Insert a like if none exists for the pair.
    ///
    /// Returns `true` if a new like was stored, `false` if the post was
    /// already liked by this user. Runs on a caller-owned connection so the
    /// like notification commits (or rolls back) together with the like.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        post_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO likes (user_id, post_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, post_id) DO NOTHING
             RETURNING id",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(inserted.is_some())
    }

    /// Remove a like if present. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the user has liked the post.
    pub async fn exists(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM likes WHERE user_id = $1 AND post_id = $2")
                .bind(user_id)
                .bind(post_id)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }

    /// Number of likes on a post.
    pub async fn count_for_post(pool: &PgPool, post_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
