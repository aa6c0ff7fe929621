//! Topic snapshot data and input validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::version::Snapshot;

/// The versioned payload of a topic: everything that changes per version.
///
/// Identity, the parent link, and the soft-delete marker live on the topic
/// record itself and are never versioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSnapshot {
    pub name: String,
    pub content: String,
}

/// Partial update applied on top of the previous snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicPatch {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl TopicPatch {
    /// `true` if the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }
}

impl Snapshot for TopicSnapshot {
    type Patch = TopicPatch;

    fn merge(&self, patch: &TopicPatch) -> TopicSnapshot {
        TopicSnapshot {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            content: patch
                .content
                .clone()
                .unwrap_or_else(|| self.content.clone()),
        }
    }
}

/// Validate a topic name: must be non-empty.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Topic name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate topic content: must be non-empty.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.is_empty() {
        return Err(CoreError::Validation(
            "Topic content must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate an update patch: at least one field, and any given field must
/// pass the create-time rules.
pub fn validate_patch(patch: &TopicPatch) -> Result<(), CoreError> {
    if patch.is_empty() {
        return Err(CoreError::Validation(
            "At least one field must be provided".to_string(),
        ));
    }
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(content) = &patch.content {
        validate_content(content)?;
    }
    Ok(())
}
