//! Resource CRUD with owning-topic checks.

use kbase_core::error::CoreError;
use kbase_core::resource::{validate_description, validate_type, validate_url};
use kbase_core::types::DbId;
use kbase_db::models::resource::{CreateResource, UpdateResource};
use kbase_db::repositories::{ResourceRepo, TopicRepo};

use crate::dto::{to_resource_dto, ResourceDto};

#[derive(Debug, Clone)]
pub struct ResourceService {
    topic_repo: TopicRepo,
    resource_repo: ResourceRepo,
}

impl ResourceService {
    pub fn new(topic_repo: TopicRepo, resource_repo: ResourceRepo) -> Self {
        Self {
            topic_repo,
            resource_repo,
        }
    }

    /// Create a resource under a live topic.
    pub fn create_resource(&self, params: CreateResource) -> Result<ResourceDto, CoreError> {
        validate_url(&params.url)?;
        if let Some(description) = &params.description {
            validate_description(description)?;
        }
        validate_type(&params.kind)?;
        self.topic_repo
            .get_topic_record(params.topic_id)
            .ok_or(CoreError::TopicNotFound {
                id: params.topic_id,
            })?;
        let record = self.resource_repo.create(params);
        Ok(to_resource_dto(&record))
    }

    pub fn get_resource(&self, id: DbId) -> Option<ResourceDto> {
        self.resource_repo
            .get_by_id(id)
            .map(|r| to_resource_dto(&r))
    }

    /// Live resources of a live topic.
    pub fn list_by_topic(&self, topic_id: DbId) -> Result<Vec<ResourceDto>, CoreError> {
        self.topic_repo
            .get_topic_record(topic_id)
            .ok_or(CoreError::TopicNotFound { id: topic_id })?;
        Ok(self
            .resource_repo
            .list_by_topic(topic_id)
            .iter()
            .map(to_resource_dto)
            .collect())
    }

    /// Apply a partial update. The patch must name at least one field;
    /// `Ok(None)` means the resource is missing or deleted.
    pub fn update_resource(
        &self,
        id: DbId,
        update: UpdateResource,
    ) -> Result<Option<ResourceDto>, CoreError> {
        if update.is_empty() {
            return Err(CoreError::Validation(
                "At least one field must be provided".to_string(),
            ));
        }
        if let Some(url) = &update.url {
            validate_url(url)?;
        }
        if let Some(description) = &update.description {
            validate_description(description)?;
        }
        if let Some(kind) = &update.kind {
            validate_type(kind)?;
        }
        Ok(self
            .resource_repo
            .update(id, &update)
            .map(|r| to_resource_dto(&r)))
    }

    /// Soft-delete. `false` if missing or already deleted.
    pub fn delete_resource(&self, id: DbId) -> bool {
        self.resource_repo.soft_delete(id)
    }
}
