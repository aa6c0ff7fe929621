//! Outward-facing DTOs combining topic identity with version payloads.

use kbase_core::types::{DbId, Timestamp};
use kbase_db::models::resource::ResourceRecord;
use kbase_db::models::topic::{TopicRecord, TopicVersionRecord};
use serde::Serialize;

/// A topic flattened with its resolved version.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDto {
    pub id: DbId,
    pub parent_topic_id: Option<DbId>,
    pub name: String,
    pub content: String,
    pub version: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicVersionDto {
    pub topic_id: DbId,
    pub version: u32,
    pub name: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: DbId,
    pub topic_id: DbId,
    pub url: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Identity timestamps come from the topic record, content ones from the
/// version: `created_at` is when the topic was born, `updated_at` when
/// this version was written.
pub fn to_topic_dto(topic: &TopicRecord, version: &TopicVersionRecord) -> TopicDto {
    TopicDto {
        id: topic.id,
        parent_topic_id: topic.parent_topic_id,
        name: version.name.clone(),
        content: version.content.clone(),
        version: version.version,
        created_at: topic.created_at,
        updated_at: version.updated_at,
    }
}

pub fn to_topic_version_dto(v: &TopicVersionRecord) -> TopicVersionDto {
    TopicVersionDto {
        topic_id: v.topic_id,
        version: v.version,
        name: v.name.clone(),
        content: v.content.clone(),
        created_at: v.created_at,
        updated_at: v.updated_at,
    }
}

pub fn to_resource_dto(r: &ResourceRecord) -> ResourceDto {
    ResourceDto {
        id: r.id,
        topic_id: r.topic_id,
        url: r.url.clone(),
        description: r.description.clone(),
        kind: r.kind.clone(),
        created_at: r.created_at,
        updated_at: r.updated_at,
    }
}
