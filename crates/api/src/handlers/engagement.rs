//! Engagement handlers: the feed and the like/unlike toggle.
//!
//! These are the only writers of like rows, and together with the comment
//! and follow handlers the only producers of notifications. The acting
//! identity always arrives as an [`AuthUser`] parameter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use murmur_core::engagement::{TargetRef, VERB_LIKED_POST};
use murmur_core::error::CoreError;
use murmur_core::types::DbId;
use murmur_db::models::post::PostDetail;
use murmur_db::repositories::{FollowRepo, LikeRepo, NotificationRepo, PostRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DetailResponse;
use crate::state::AppState;

/// GET /api/v1/feed
///
/// Posts authored by anyone the authenticated user follows, newest first
/// with stable id tie-breaking. Composed on demand from the follow set and
/// the posts table; there is no materialized feed. An empty follow set
/// yields an empty list, not an error.
pub async fn feed(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<PostDetail>>> {
    let following = FollowRepo::list_following(&state.pool, auth.user_id).await?;
    let posts =
        PostRepo::list_by_authors(&state.pool, &following, params.limit, params.offset).await?;
    Ok(Json(posts))
}

/// POST /api/v1/posts/{id}/like
///
/// Idempotent like. The first call stores the like and, unless the liker is
/// the post's author, notifies the author; both rows commit in one
/// transaction, so a failed notification insert rolls the like back.
/// Repeat calls change nothing and report "Already liked" -- in particular
/// they never append a second notification.
pub async fn like_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DetailResponse>)> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    let mut tx = state.pool.begin().await?;
    let created = LikeRepo::create(&mut tx, auth.user_id, post.id).await?;
    if created && auth.user_id != post.author_id {
        NotificationRepo::create(
            &mut tx,
            post.author_id,
            auth.user_id,
            VERB_LIKED_POST,
            Some(TargetRef::Post(post.id)),
        )
        .await?;
    }
    tx.commit().await?;

    if created {
        tracing::debug!(user_id = auth.user_id, post_id = post.id, "post liked");
        Ok((StatusCode::CREATED, Json(DetailResponse::new("Post liked"))))
    } else {
        Ok((StatusCode::OK, Json(DetailResponse::new("Already liked"))))
    }
}

/// POST /api/v1/posts/{id}/unlike
///
/// Remove a like if present. Unliking a post that was never liked is a
/// no-op reported as such, not an error, so client retries are always
/// safe. No notification is emitted, and the like's original notification
/// stays in the append-only log.
pub async fn unlike_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DetailResponse>> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    let removed = LikeRepo::delete(&state.pool, auth.user_id, post.id).await?;

    if removed {
        Ok(Json(DetailResponse::new("Like removed")))
    } else {
        Ok(Json(DetailResponse::new("No like to remove")))
    }
}
