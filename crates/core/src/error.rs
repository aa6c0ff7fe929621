use crate::types::DbId;

/// Domain error for every fallible core operation.
///
/// Policy denials are deliberately absent: the policy functions in
/// [`crate::policy`] return booleans and the caller decides how to reject.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Topic not found: {id}")]
    TopicNotFound { id: DbId },

    #[error("Parent topic not found")]
    ParentNotFound,

    #[error("Version {version} not found")]
    VersionNotFound { version: u32 },

    #[error("Sibling with name \"{name}\" already exists")]
    DuplicateSiblingName { name: String },

    #[error("No path between {from} and {to}")]
    NoPath { from: DbId, to: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
