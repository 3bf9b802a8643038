//! Route definitions for the `/admin` resource.
//!
//! All endpoints require the `admin` role (enforced by the handlers'
//! `RequireAdmin` extractor).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /users                  -> list_users
/// POST /users/{id}/deactivate  -> deactivate_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/deactivate", post(admin::deactivate_user))
}
