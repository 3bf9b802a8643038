//! Handlers for the `/posts` resource.
//!
//! Posts are owned: update and delete require the authenticated user to be
//! the author. The author itself is immutable after creation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use murmur_core::error::CoreError;
use murmur_core::types::DbId;
use murmur_db::models::post::{CreatePost, Post, PostDetail, UpdatePost};
use murmur_db::repositories::PostRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/posts
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<Post>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }
    let post = PostRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/v1/posts
///
/// All posts, newest first.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<PostDetail>>> {
    let posts = PostRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(posts))
}

/// GET /api/v1/posts/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PostDetail>> {
    let post = PostRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    Ok(Json(post))
}

/// PUT /api/v1/posts/{id}
///
/// Author only. Title/content are the only mutable fields.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<Post>> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    if post.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can edit this post".into(),
        )));
    }

    let updated = PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/posts/{id}
///
/// Author only. Returns 204 No Content.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    if post.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can delete this post".into(),
        )));
    }

    PostRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
