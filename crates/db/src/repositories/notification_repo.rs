//! Repository for the `notifications` table.

use murmur_core::engagement::TargetRef;
use murmur_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use murmur_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::notification::NotificationDetail;

/// Provides operations on the append-only notification log.
///
/// `create` is a pure append: it performs no duplicate checks. Dedup is the
/// caller's responsibility (the like handler's "already liked" short-circuit
/// never reaches this layer), as is the actor != recipient guard.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Append a notification, returning the generated ID.
    ///
    /// Runs on a caller-owned connection: engagement handlers insert the
    /// notification in the same transaction as the like/comment/follow it
    /// records, so either both commit or neither does.
    pub async fn create(
        conn: &mut PgConnection,
        recipient_id: DbId,
        actor_id: DbId,
        verb: &str,
        target: Option<TargetRef>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (recipient_id, actor_id, verb, target_type, target_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(recipient_id)
        .bind(actor_id)
        .bind(verb)
        .bind(target.map(|t| t.kind()))
        .bind(target.map(|t| t.id()))
        .fetch_one(&mut *conn)
        .await
    }

    /// List notifications for a recipient, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with
    /// `is_read = false` are returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<NotificationDetail>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let filter = if unread_only {
            "AND n.is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT n.id, n.actor_id, u.username AS actor_username, n.verb, \
             n.target_type, n.target_id, n.is_read, n.created_at \
             FROM notifications n JOIN users u ON u.id = n.actor_id \
             WHERE n.recipient_id = $1 {filter} \
             ORDER BY n.created_at DESC, n.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, NotificationDetail>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification was found for the given recipient
    /// and updated, `false` otherwise.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND recipient_id = $2 AND is_read = false",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a recipient.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get the number of unread notifications for a recipient.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Total notifications for a recipient, read or not. Used by tests to
    /// assert the append-only log's row count.
    pub async fn count_for_recipient(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE recipient_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
