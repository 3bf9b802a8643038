//! Handlers for the `/users` resource: profiles and the follow graph.

use axum::extract::{Path, State};
use axum::Json;
use murmur_core::engagement::VERB_FOLLOWED;
use murmur_core::error::CoreError;
use murmur_core::types::DbId;
use murmur_db::models::user::{UpdateProfile, UserProfile};
use murmur_db::repositories::{FollowRepo, NotificationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DetailResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
///
/// The authenticated user's own profile with follow counts.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserProfile>> {
    let profile = UserRepo::get_profile(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(profile))
}

/// PUT /api/v1/users/me
///
/// Update the authenticated user's profile (bio, avatar). Only non-`None`
/// fields are applied.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserProfile>> {
    UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    // Return the full profile view so the client sees the merged result.
    let profile = UserRepo::get_profile(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(profile))
}

/// GET /api/v1/users/{id}
///
/// Another user's public profile with follow counts.
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserProfile>> {
    let profile = UserRepo::get_profile(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(profile))
}

// ---------------------------------------------------------------------------
// Follow graph
// ---------------------------------------------------------------------------

/// POST /api/v1/users/{id}/follow
///
/// Start following another user. Following yourself is rejected outright
/// (400), not silently ignored. Following someone you already follow is a
/// no-op: edges have set semantics and no duplicate notification is sent.
pub async fn follow(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DetailResponse>> {
    if id == auth.user_id {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "You cannot follow yourself".into(),
        )));
    }

    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    // Edge insert and follow notification commit together; a duplicate
    // follow inserts nothing and notifies nobody.
    let mut tx = state.pool.begin().await?;
    let created = FollowRepo::create(&mut tx, auth.user_id, target.id).await?;
    if created {
        NotificationRepo::create(&mut tx, target.id, auth.user_id, VERB_FOLLOWED, None).await?;
    }
    tx.commit().await?;

    Ok(Json(DetailResponse::new(format!(
        "You are now following {}.",
        target.username
    ))))
}

/// POST /api/v1/users/{id}/unfollow
///
/// Stop following another user. Unfollowing someone you don't follow is a
/// no-op with the same success response; no notification in either case.
pub async fn unfollow(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DetailResponse>> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    FollowRepo::delete(&state.pool, auth.user_id, target.id).await?;

    Ok(Json(DetailResponse::new(format!(
        "You have unfollowed {}.",
        target.username
    ))))
}
