//! Resource records and DTOs.

use kbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// An external resource linked to a topic. Independent of topic
/// versioning; soft-deleted via `deleted_at`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub id: DbId,
    pub topic_id: DbId,
    pub url: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ResourceRecord {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Record for ResourceRecord {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Input for creating a resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResource {
    pub topic_id: DbId,
    pub url: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Partial update for a resource. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResource {
    pub url: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl UpdateResource {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.description.is_none() && self.kind.is_none()
    }
}
