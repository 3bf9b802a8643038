//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Read-model structs for queries that join in display fields

pub mod comment;
pub mod follow;
pub mod like;
pub mod notification;
pub mod post;
pub mod role;
pub mod session;
pub mod user;
