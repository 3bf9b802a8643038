//! Route definitions for the top-level `/comments` resource.
//!
//! Creation and listing live under `/posts/{id}/comments`; only deletion
//! addresses a comment by its own id.

use axum::routing::delete;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// DELETE /{id} -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comment::delete))
}
