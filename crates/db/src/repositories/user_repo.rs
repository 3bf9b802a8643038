//! Repository for the `users` and `profiles` tables.

use murmur_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, Profile, UpdateProfile, User, UserProfile};

/// Column list shared across `users` queries to avoid repetition.
const USER_COLUMNS: &str =
    "id, username, email, password_hash, role_id, is_active, created_at, updated_at";

/// Column list for `profiles` queries.
const PROFILE_COLUMNS: &str = "user_id, bio, avatar_url, created_at, updated_at";

/// Public profile query: account fields joined with the profile plus
/// follower/following counts derived from the `follows` table.
const PROFILE_VIEW: &str = "SELECT u.id, u.username, u.email, p.bio, p.avatar_url, \
     (SELECT COUNT(*) FROM follows f WHERE f.followed_id = u.id) AS followers_count, \
     (SELECT COUNT(*) FROM follows f WHERE f.follower_id = u.id) AS following_count, \
     u.created_at \
     FROM users u JOIN profiles p ON p.user_id = u.id";

/// Provides CRUD operations for users and their profiles.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user together with its (initially sparse) profile row.
    ///
    /// Both inserts happen in one transaction: a user without a profile can
    /// never be observed, even if the second insert fails.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (username, email, password_hash, role_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO profiles (user_id, bio) VALUES ($1, $2)")
            .bind(user.id)
            .bind(&input.bio)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Soft-deactivate a user by setting `is_active = false`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the public profile view (profile fields + follow counts).
    pub async fn get_profile(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("{PROFILE_VIEW} WHERE u.id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the profile row. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no profile exists for `user_id`.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                bio = COALESCE($2, bio),
                avatar_url = COALESCE($3, avatar_url)
             WHERE user_id = $1
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.bio)
            .bind(&input.avatar_url)
            .fetch_optional(pool)
            .await
    }
}
