//! Topic identity and version records.

use kbase_core::topic::TopicSnapshot;
use kbase_core::types::{DbId, Timestamp};
use kbase_core::version::Version;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// A topic's identity: parent link, current-version pointer, soft-delete
/// marker. The versioned payload (name, content) lives in
/// [`TopicVersionRecord`] rows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecord {
    pub id: DbId,
    pub parent_topic_id: Option<DbId>,
    pub current_version: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl TopicRecord {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Record for TopicRecord {
    fn id(&self) -> DbId {
        self.id
    }
}

/// One immutable snapshot of a topic, as stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicVersionRecord {
    pub id: DbId,
    pub topic_id: DbId,
    pub version: u32,
    pub name: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TopicVersionRecord {
    /// Persistable row for a ledger version, with a fresh row id.
    pub fn from_version(topic_id: DbId, v: &Version<TopicSnapshot>) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic_id,
            version: v.version,
            name: v.data.name.clone(),
            content: v.data.content.clone(),
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }

    /// The ledger view of this row.
    pub fn to_version(&self) -> Version<TopicSnapshot> {
        Version {
            version: self.version,
            data: TopicSnapshot {
                name: self.name.clone(),
                content: self.content.clone(),
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Record for TopicVersionRecord {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Input for creating a topic (root or child).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopic {
    pub name: String,
    pub content: String,
    /// Explicit id, e.g. for imports. Generated when `None`.
    pub id: Option<DbId>,
}

impl CreateTopic {
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
            id: None,
        }
    }
}
