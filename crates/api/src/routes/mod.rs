pub mod admin;
pub mod auth;
pub mod comment;
pub mod engagement;
pub mod health;
pub mod notification;
pub mod post;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /users/me                            get, update own profile
/// /users/{id}                          public profile (GET)
/// /users/{id}/follow                   follow (POST)
/// /users/{id}/unfollow                 unfollow (POST)
///
/// /posts                               list, create
/// /posts/{id}                          get, update, delete
/// /posts/{id}/comments                 list, create
/// /posts/{id}/like                     like (POST)
/// /posts/{id}/unlike                   unlike (POST)
///
/// /comments/{id}                       delete comment
///
/// /feed                                posts by followed users (GET)
///
/// /notifications                       list (?unread_only, limit, offset)
/// /notifications/read-all              mark all read (POST)
/// /notifications/unread-count          unread count (GET)
/// /notifications/{id}/read             mark read (POST)
///
/// /admin/users                         list users (admin only)
/// /admin/users/{id}/deactivate         deactivate (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Profiles and the follow graph.
        .nest("/users", user::router())
        // Posts with nested comments and like/unlike.
        .nest("/posts", post::router())
        // Top-level comment deletion.
        .nest("/comments", comment::router())
        // Feed composition.
        .merge(engagement::router())
        // Notification log.
        .nest("/notifications", notification::router())
        // Admin user management.
        .nest("/admin", admin::router())
}
