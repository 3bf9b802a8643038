//! User and profile entity models and DTOs.

use murmur_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A profile row from the `profiles` table.
///
/// Every user has exactly one profile; it is inserted in the same
/// transaction as the user row, so a user without a profile cannot exist.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public user representation: account fields joined with the profile and
/// follow counts. Safe for API responses (no password hash).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub followers_count: i64,
    pub following_count: i64,
    pub created_at: Timestamp,
}

/// DTO for creating a new user (with its profile, in one transaction).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub bio: Option<String>,
}

/// DTO for updating the authenticated user's profile. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}
