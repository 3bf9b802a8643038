//! Route definitions for the `/users` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /me              -> me
/// PUT  /me              -> update_me
/// GET  /{id}            -> get_by_id
/// POST /{id}/follow     -> follow
/// POST /{id}/unfollow   -> unfollow
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(user::me).put(user::update_me))
        .route("/{id}", get(user::get_by_id))
        .route("/{id}/follow", post(user::follow))
        .route("/{id}/unfollow", post(user::unfollow))
}
