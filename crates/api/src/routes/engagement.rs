//! Route definitions for the feed.
//!
//! Like/unlike routes live under `/posts` (see [`crate::routes::post`]);
//! only the feed gets its own top-level path.

use axum::routing::get;
use axum::Router;

use crate::handlers::engagement;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET /feed -> feed
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/feed", get(engagement::feed))
}
