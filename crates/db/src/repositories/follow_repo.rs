//! Repository for the `follows` table (the directed follow graph).

use murmur_core::types::DbId;
use sqlx::{PgConnection, PgPool};

/// Provides operations on follow edges.
///
/// Edges have set semantics: inserts are deduplicated on the
/// `(follower_id, followed_id)` primary key, so "follow twice" is a no-op.
pub struct FollowRepo;

impl FollowRepo {
    /// Insert a follow edge if it does not already exist.
    ///
    /// Returns `true` if a new edge was created, `false` if the edge was
    /// already present. Runs on a caller-owned connection so the follow
    /// notification can be committed in the same transaction.
    pub async fn create(
        conn: &mut PgConnection,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO follows (follower_id, followed_id)
             VALUES ($1, $2)
             ON CONFLICT (follower_id, followed_id) DO NOTHING
             RETURNING follower_id",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(inserted.is_some())
    }

    /// Remove a follow edge. Returns `true` if an edge was removed.
    pub async fn delete(
        pool: &PgPool,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
                .bind(follower_id)
                .bind(followed_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Return the ids of all users `user_id` follows.
    ///
    /// Pure read; a user following nobody yields an empty vec. Self-follows
    /// cannot appear: they are rejected upstream and by the table's CHECK
    /// constraint.
    pub async fn list_following(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT followed_id FROM follows WHERE follower_id = $1 ORDER BY followed_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Whether `follower_id` currently follows `followed_id`.
    pub async fn exists(
        pool: &PgPool,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar(
            "SELECT 1::bigint FROM follows WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }
}
