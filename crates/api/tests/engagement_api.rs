//! HTTP-level integration tests for the engagement engine: feed
//! composition, the idempotent like/unlike toggle, and notification side
//! effects.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_auth, post_json, post_json_auth};
use murmur_db::repositories::NotificationRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register a user via the API, returning `(user_id, access_token)`.
async fn register_user(pool: &PgPool, username: &str) -> (i64, String) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["user"]["id"].as_i64().unwrap(),
        json["access_token"].as_str().unwrap().to_string(),
    )
}

/// Create a post via the API, returning its id.
async fn create_post(pool: &PgPool, token: &str, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": title, "content": format!("{title} body") });
    let response = post_json_auth(app, "/api/v1/posts", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Follow `target_id` as the holder of `token`.
async fn follow(pool: &PgPool, token: &str, target_id: i64) {
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/users/{target_id}/follow"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Feed composition
// ---------------------------------------------------------------------------

/// The feed contains exactly the posts of followed users, newest first,
/// and excludes posts by non-followed users and by the requester.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_feed_contains_only_followed_authors(pool: PgPool) {
    let (_u_id, u_token) = register_user(&pool, "reader").await;
    let (a_id, a_token) = register_user(&pool, "alice").await;
    let (b_id, b_token) = register_user(&pool, "bob").await;
    let (_c_id, c_token) = register_user(&pool, "carol").await;

    follow(&pool, &u_token, a_id).await;
    follow(&pool, &u_token, b_id).await;

    let a_post = create_post(&pool, &a_token, "alice post").await;
    let b_post = create_post(&pool, &b_token, "bob post").await;
    let _c_post = create_post(&pool, &c_token, "carol post").await;
    // The reader's own post must not appear either.
    let _own = create_post(&pool, &u_token, "my own post").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/feed", &u_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let posts = json.as_array().unwrap();
    let ids: Vec<i64> = posts.iter().map(|p| p["id"].as_i64().unwrap()).collect();

    // Newest first: bob's post was created after alice's.
    assert_eq!(ids, vec![b_post, a_post]);
    for post in posts {
        let author = post["author_username"].as_str().unwrap();
        assert!(
            author == "alice" || author == "bob",
            "unexpected author in feed: {author}"
        );
    }
}

/// A user following nobody gets an empty feed, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_feed_empty_follow_set(pool: PgPool) {
    let (_id, token) = register_user(&pool, "hermit").await;
    let (_a_id, a_token) = register_user(&pool, "alice").await;
    create_post(&pool, &a_token, "unseen").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/feed", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

/// The feed requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_feed_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/feed").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Like / unlike
// ---------------------------------------------------------------------------

/// Liking twice stores exactly one like and one notification; the second
/// call reports "Already liked".
#[sqlx::test(migrations = "../db/migrations")]
async fn test_like_is_idempotent(pool: PgPool) {
    let (author_id, author_token) = register_user(&pool, "author").await;
    let (_liker_id, liker_token) = register_user(&pool, "liker").await;
    let post_id = create_post(&pool, &author_token, "likeable").await;

    // First like: 201 + notification.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/posts/{post_id}/like"), &liker_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Post liked");

    // Second like: 200, no new rows.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/posts/{post_id}/like"), &liker_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Already liked");

    let likes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(likes, 1, "exactly one like row must exist");

    let notifications = NotificationRepo::count_for_recipient(&pool, author_id)
        .await
        .unwrap();
    assert_eq!(notifications, 1, "exactly one notification must exist");
}

/// Liking your own post stores the like but never notifies.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_self_like_stores_like_without_notification(pool: PgPool) {
    let (author_id, author_token) = register_user(&pool, "selfish").await;
    let post_id = create_post(&pool, &author_token, "my own").await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/posts/{post_id}/like"), &author_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let likes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(likes, 1, "the self-like itself is stored");

    let notifications = NotificationRepo::count_for_recipient(&pool, author_id)
        .await
        .unwrap();
    assert_eq!(notifications, 0, "self-likes never notify");
}

/// Unliking with no like present is a reported no-op, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unlike_without_like_is_noop(pool: PgPool) {
    let (_author_id, author_token) = register_user(&pool, "author").await;
    let (_liker_id, liker_token) = register_user(&pool, "liker").await;
    let post_id = create_post(&pool, &author_token, "never liked").await;

    let app = common::build_test_app(pool);
    let response = post_auth(app, &format!("/api/v1/posts/{post_id}/unlike"), &liker_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "No like to remove");
}

/// Like and unlike against a nonexistent post both return 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_like_unknown_post_returns_404(pool: PgPool) {
    let (_id, token) = register_user(&pool, "someone").await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/posts/999999/like", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/posts/999999/unlike", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Full engagement scenario
// ---------------------------------------------------------------------------

/// The end-to-end scenario: follow, two posts, feed order, like, duplicate
/// like, unlike. The notification log survives the unlike.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_engagement_scenario(pool: PgPool) {
    let (_u1_id, u1_token) = register_user(&pool, "u1").await;
    let (u2_id, u2_token) = register_user(&pool, "u2").await;

    // U1 follows U2; U2 gets a follow notification.
    follow(&pool, &u1_token, u2_id).await;
    assert_eq!(
        NotificationRepo::count_for_recipient(&pool, u2_id).await.unwrap(),
        1
    );

    // U2 creates P1 then P2.
    let p1 = create_post(&pool, &u2_token, "P1").await;
    let p2 = create_post(&pool, &u2_token, "P2").await;

    // feed(U1) = [P2, P1].
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/feed", &u1_token).await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![p2, p1]);

    // U1 likes P1: one like notification for U2 (on top of the follow one).
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/posts/{p1}/like"), &u1_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        NotificationRepo::count_for_recipient(&pool, u2_id).await.unwrap(),
        2
    );

    // Duplicate like: count stays put.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/posts/{p1}/like"), &u1_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["detail"], "Already liked");
    assert_eq!(
        NotificationRepo::count_for_recipient(&pool, u2_id).await.unwrap(),
        2
    );

    // Unlike removes the like; the log is append-only and keeps both rows.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/posts/{p1}/unlike"), &u1_token).await;
    assert_eq!(body_json(response).await["detail"], "Like removed");

    let likes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(p1)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(likes, 0);
    assert_eq!(
        NotificationRepo::count_for_recipient(&pool, u2_id).await.unwrap(),
        2,
        "notifications are never retracted"
    );
}

// ---------------------------------------------------------------------------
// Follow graph edge cases
// ---------------------------------------------------------------------------

/// Following yourself is rejected outright with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_self_follow_rejected(pool: PgPool) {
    let (id, token) = register_user(&pool, "narcissus").await;

    let app = common::build_test_app(pool);
    let response = post_auth(app, &format!("/api/v1/users/{id}/follow"), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_OPERATION");
}

/// Following twice keeps one edge and one notification.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_follow_is_idempotent(pool: PgPool) {
    let (_a_id, a_token) = register_user(&pool, "alice").await;
    let (b_id, _b_token) = register_user(&pool, "bob").await;

    follow(&pool, &a_token, b_id).await;
    follow(&pool, &a_token, b_id).await;

    let edges: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE followed_id = $1")
        .bind(b_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(edges, 1);
    assert_eq!(
        NotificationRepo::count_for_recipient(&pool, b_id).await.unwrap(),
        1,
        "duplicate follows must not duplicate the notification"
    );
}

/// Following an unknown user returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_follow_unknown_user_returns_404(pool: PgPool) {
    let (_id, token) = register_user(&pool, "someone").await;

    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/users/999999/follow", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Unfollow removes the edge; a repeat unfollow is still a 200 no-op.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unfollow_then_feed_is_empty(pool: PgPool) {
    let (_a_id, a_token) = register_user(&pool, "alice").await;
    let (b_id, b_token) = register_user(&pool, "bob").await;

    follow(&pool, &a_token, b_id).await;
    create_post(&pool, &b_token, "soon gone").await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/users/{b_id}/unfollow"), &a_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Repeat unfollow is tolerated.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/users/{b_id}/unfollow"), &a_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/feed", &a_token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}
