//! Handlers for the `/admin` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use murmur_core::error::CoreError;
use murmur_core::types::{DbId, Timestamp};
use murmur_db::models::user::User;
use murmur_db::repositories::{RoleRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Admin-facing user representation with the resolved role name.
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
}

fn build_user_response(user: &User, role: String) -> AdminUserResponse {
    AdminUserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role,
        role_id: user.role_id,
        is_active: user.is_active,
        created_at: user.created_at,
    }
}

/// GET /api/v1/admin/users
///
/// List all users with resolved role names.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<AdminUserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    // Pre-fetch all roles to avoid N+1 queries.
    let roles = RoleRepo::list(&state.pool).await?;

    let responses: Vec<AdminUserResponse> = users
        .iter()
        .map(|u| {
            let role_name = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            build_user_response(u, role_name)
        })
        .collect();

    Ok(Json(responses))
}

/// POST /api/v1/admin/users/{id}/deactivate
///
/// Soft-deactivate an account: the user can no longer log in, but their
/// posts, comments, and likes remain. Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "You cannot deactivate your own account".into(),
        )));
    }

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    Ok(StatusCode::NO_CONTENT)
}
