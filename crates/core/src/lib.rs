//! Shared domain types for the murmur social API.
//!
//! This crate has no database or HTTP dependencies so it can be used by
//! both the data layer and the API layer.

pub mod engagement;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
