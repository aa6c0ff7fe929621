//! Recursive topic-tree construction.

use kbase_core::error::CoreError;
use kbase_core::types::{DbId, Timestamp};
use kbase_core::version::VersionSelector;
use kbase_db::repositories::{ResourceRepo, TopicRepo};
use serde::Serialize;

use crate::dto::{to_resource_dto, ResourceDto};

/// A topic subtree: the node resolved at one version, children resolved
/// recursively at their own latest version.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicTree {
    pub id: DbId,
    pub parent_topic_id: Option<DbId>,
    pub name: String,
    pub content: String,
    pub version: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceDto>>,
    pub children: Vec<TopicTree>,
}

#[derive(Debug, Clone)]
pub struct TopicTreeService {
    topic_repo: TopicRepo,
    resource_repo: ResourceRepo,
}

impl TopicTreeService {
    pub fn new(topic_repo: TopicRepo, resource_repo: ResourceRepo) -> Self {
        Self {
            topic_repo,
            resource_repo,
        }
    }

    /// Build the subtree rooted at `id`.
    ///
    /// The root node is resolved at `selector`; children are always
    /// resolved at their own latest version, whatever the root was pinned
    /// to. `include_resources` attaches each node's live resources.
    pub fn get_tree(
        &self,
        id: DbId,
        selector: VersionSelector,
        include_resources: bool,
    ) -> Result<TopicTree, CoreError> {
        let topic = self
            .topic_repo
            .get_topic_record(id)
            .ok_or(CoreError::TopicNotFound { id })?;
        let version_number = match selector {
            VersionSelector::Latest => topic.current_version,
            VersionSelector::Number(n) => n,
        };
        let version = self
            .topic_repo
            .get_version(id, version_number)
            .ok_or(CoreError::VersionNotFound {
                version: version_number,
            })?;

        let resources = include_resources.then(|| {
            self.resource_repo
                .list_by_topic(id)
                .iter()
                .map(to_resource_dto)
                .collect()
        });

        let children = self
            .topic_repo
            .get_children(id)
            .iter()
            .filter_map(|child| {
                self.get_tree(child.id, VersionSelector::Latest, include_resources)
                    .ok()
            })
            .collect();

        Ok(TopicTree {
            id: topic.id,
            parent_topic_id: topic.parent_topic_id,
            name: version.name,
            content: version.content,
            version: version.version,
            created_at: topic.created_at,
            updated_at: version.updated_at,
            resources,
            children,
        })
    }
}
