//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that participate in a
//! caller-owned transaction (the like/notify and comment/notify pairs) take
//! `&mut PgConnection` instead, so the handler decides the commit boundary.

pub mod comment_repo;
pub mod follow_repo;
pub mod like_repo;
pub mod notification_repo;
pub mod post_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use follow_repo::FollowRepo;
pub use like_repo::LikeRepo;
pub use notification_repo::NotificationRepo;
pub use post_repo::PostRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
