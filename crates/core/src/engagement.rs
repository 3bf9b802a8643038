//! Engagement vocabulary: notification verbs and typed target references.
//!
//! Notifications describe "actor did *verb* to *target* for recipient".
//! The verb strings below are the full set the engagement handlers emit;
//! the notification listing endpoint returns them verbatim.

use crate::types::DbId;

/// Emitted when a user likes someone else's post.
pub const VERB_LIKED_POST: &str = "liked your post";

/// Emitted when a user comments on someone else's post.
pub const VERB_COMMENTED: &str = "commented on your post";

/// Emitted when a user starts following another user.
pub const VERB_FOLLOWED: &str = "started following you";

/// A typed reference to the entity an engagement action touched.
///
/// Stored as a `(target_type, target_id)` column pair on the notification
/// row and resolved explicitly by consumers. Deliberately NOT a generic
/// "any model" reference: every representable target is listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRef {
    Post(DbId),
    Comment(DbId),
}

impl TargetRef {
    /// The `target_type` discriminant stored in the database.
    pub fn kind(&self) -> &'static str {
        match self {
            TargetRef::Post(_) => "post",
            TargetRef::Comment(_) => "comment",
        }
    }

    /// The referenced entity's id.
    pub fn id(&self) -> DbId {
        match self {
            TargetRef::Post(id) | TargetRef::Comment(id) => *id,
        }
    }

    /// Rebuild a reference from its stored column pair.
    ///
    /// Returns `None` for an unknown `target_type`, which callers should
    /// treat as data corruption rather than silently skip.
    pub fn from_parts(kind: &str, id: DbId) -> Option<Self> {
        match kind {
            "post" => Some(TargetRef::Post(id)),
            "comment" => Some(TargetRef::Comment(id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_ref_round_trips_through_parts() {
        let target = TargetRef::Post(42);
        let rebuilt = TargetRef::from_parts(target.kind(), target.id());
        assert_eq!(rebuilt, Some(target));

        let target = TargetRef::Comment(7);
        let rebuilt = TargetRef::from_parts(target.kind(), target.id());
        assert_eq!(rebuilt, Some(target));
    }

    #[test]
    fn unknown_target_kind_is_rejected() {
        assert_eq!(TargetRef::from_parts("gallery", 1), None);
    }
}
