//! Handlers for comments (nested under `/posts/{id}/comments` plus a
//! top-level delete route).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use murmur_core::engagement::{TargetRef, VERB_COMMENTED};
use murmur_core::error::CoreError;
use murmur_core::types::DbId;
use murmur_db::models::comment::{Comment, CommentDetail, CreateComment};
use murmur_db::repositories::{CommentRepo, NotificationRepo, PostRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/posts/{id}/comments
///
/// Comment on a post. The post author is notified unless they are the
/// commenter; comment and notification commit in one transaction.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment must not be empty".into(),
        )));
    }

    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    let mut tx = state.pool.begin().await?;
    let comment = CommentRepo::create(&mut tx, post.id, auth.user_id, &input.content).await?;
    if auth.user_id != post.author_id {
        NotificationRepo::create(
            &mut tx,
            post.author_id,
            auth.user_id,
            VERB_COMMENTED,
            Some(TargetRef::Comment(comment.id)),
        )
        .await?;
    }
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/posts/{id}/comments
///
/// A post's comments, oldest first.
pub async fn list_for_post(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<Vec<CommentDetail>>> {
    // 404 for an unknown post rather than an empty list.
    PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    let comments = CommentRepo::list_for_post(&state.pool, post_id).await?;
    Ok(Json(comments))
}

/// DELETE /api/v1/comments/{id}
///
/// Author only. Returns 204 No Content. The notification that the comment
/// produced (if any) is not retracted; the log is append-only.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    if comment.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can delete this comment".into(),
        )));
    }

    CommentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
