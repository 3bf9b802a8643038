//! Route definitions for the `/posts` resource, including nested comments
//! and the like/unlike toggle.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comment, engagement, post};
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/comments   -> comment::list_for_post
/// POST   /{id}/comments   -> comment::create
/// POST   /{id}/like       -> engagement::like_post
/// POST   /{id}/unlike     -> engagement::unlike_post
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(post::list).post(post::create))
        .route(
            "/{id}",
            get(post::get_by_id).put(post::update).delete(post::delete),
        )
        .route(
            "/{id}/comments",
            get(comment::list_for_post).post(comment::create),
        )
        .route("/{id}/like", post(engagement::like_post))
        .route("/{id}/unlike", post(engagement::unlike_post))
}
