//! Topic CRUD and version queries.

use kbase_core::error::CoreError;
use kbase_core::topic::{self, TopicPatch};
use kbase_core::types::DbId;
use kbase_db::models::topic::CreateTopic;
use kbase_db::repositories::TopicRepo;
use serde::Deserialize;

use crate::dto::{to_topic_dto, to_topic_version_dto, TopicDto, TopicVersionDto};

/// Input for [`TopicService::create_topic`]. A `parent_id` of `None`
/// creates a root topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicInput {
    pub name: String,
    pub content: String,
    pub parent_id: Option<DbId>,
}

#[derive(Debug, Clone)]
pub struct TopicService {
    repo: TopicRepo,
}

impl TopicService {
    pub fn new(repo: TopicRepo) -> Self {
        Self { repo }
    }

    pub fn create_topic(&self, input: CreateTopicInput) -> Result<TopicDto, CoreError> {
        topic::validate_name(&input.name)?;
        topic::validate_content(&input.content)?;
        let params = CreateTopic::new(&input.name, &input.content);
        let (topic, version) = match input.parent_id {
            Some(parent_id) => self.repo.create_child(parent_id, params)?,
            None => self.repo.create_root(params)?,
        };
        Ok(to_topic_dto(&topic, &version))
    }

    pub fn get_topic(&self, id: DbId) -> Option<TopicDto> {
        self.repo
            .get_by_id(id)
            .map(|(topic, version)| to_topic_dto(&topic, &version))
    }

    pub fn list_topics(&self, parent_id: Option<DbId>) -> Vec<TopicDto> {
        self.repo
            .list_by_parent(parent_id)
            .iter()
            .map(|(topic, version)| to_topic_dto(topic, version))
            .collect()
    }

    /// Append a new version with the patched fields. The patch must name
    /// at least one field.
    pub fn update_topic(&self, id: DbId, patch: TopicPatch) -> Result<TopicDto, CoreError> {
        topic::validate_patch(&patch)?;
        let next = self.repo.append_version(id, &patch)?;
        let (topic, _) = self
            .repo
            .get_by_id(id)
            .ok_or(CoreError::TopicNotFound { id })?;
        Ok(to_topic_dto(&topic, &next))
    }

    /// Soft-delete. `false` if the topic is missing or already deleted.
    pub fn delete_topic(&self, id: DbId) -> bool {
        self.repo.soft_delete(id)
    }

    /// All versions, newest first. `None` if the topic is missing or
    /// deleted.
    pub fn list_versions(&self, id: DbId) -> Option<Vec<TopicVersionDto>> {
        let versions = self.repo.list_versions(id)?;
        Some(versions.iter().map(to_topic_version_dto).collect())
    }

    pub fn get_version(&self, id: DbId, version: u32) -> Option<TopicVersionDto> {
        self.repo
            .get_version(id, version)
            .map(|v| to_topic_version_dto(&v))
    }
}
