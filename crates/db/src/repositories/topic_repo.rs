//! Repository for topics and their version history.
//!
//! This is the aggregate root for the topic tree: it owns sibling-name
//! uniqueness, soft-delete visibility, and the append-only version
//! history. Every mutating operation holds the database write lock for
//! its whole check-then-write sequence.

use std::collections::VecDeque;

use chrono::Utc;
use kbase_core::error::CoreError;
use kbase_core::topic::{TopicPatch, TopicSnapshot};
use kbase_core::types::DbId;
use kbase_core::version::VersionLedger;
use uuid::Uuid;

use crate::models::topic::{CreateTopic, TopicRecord, TopicVersionRecord};
use crate::store::{Database, SharedDatabase};

/// Behavior switches for [`TopicRepo`].
#[derive(Debug, Clone, Default)]
pub struct TopicStoreConfig {
    /// When set, soft-deleting a topic also marks all of its live
    /// descendants. Off by default: a deleted topic's children stay
    /// reachable by direct id lookup, invisible via tree and graph.
    pub cascade_soft_delete: bool,
}

/// Provides topic CRUD and versioning over the shared store.
#[derive(Debug, Clone)]
pub struct TopicRepo {
    db: SharedDatabase,
    config: TopicStoreConfig,
}

impl TopicRepo {
    pub fn new(db: SharedDatabase) -> Self {
        Self::with_config(db, TopicStoreConfig::default())
    }

    pub fn with_config(db: SharedDatabase, config: TopicStoreConfig) -> Self {
        Self { db, config }
    }

    /// Create a root topic (no parent) together with its version 1.
    pub fn create_root(
        &self,
        params: CreateTopic,
    ) -> Result<(TopicRecord, TopicVersionRecord), CoreError> {
        let mut db = self.db.write();
        Self::insert_topic(&mut db, None, params)
    }

    /// Create a child topic under a live parent, together with its
    /// version 1.
    pub fn create_child(
        &self,
        parent_id: DbId,
        params: CreateTopic,
    ) -> Result<(TopicRecord, TopicVersionRecord), CoreError> {
        let mut db = self.db.write();
        match db.topics.get(parent_id) {
            Some(parent) if !parent.is_deleted() => {}
            _ => return Err(CoreError::ParentNotFound),
        }
        Self::insert_topic(&mut db, Some(parent_id), params)
    }

    /// A live topic paired with its current version record. `None` when
    /// the topic is missing, soft-deleted, or its current version row is
    /// gone (a data-integrity fault, surfaced as not-found).
    pub fn get_by_id(&self, id: DbId) -> Option<(TopicRecord, TopicVersionRecord)> {
        let db = self.db.read();
        let topic = Self::live_topic(&db, id)?.clone();
        let version = Self::current_version(&db, &topic)?.clone();
        Some((topic, version))
    }

    /// The bare live topic record.
    pub fn get_topic_record(&self, id: DbId) -> Option<TopicRecord> {
        let db = self.db.read();
        Self::live_topic(&db, id).cloned()
    }

    /// Live topics under `parent_id` (or the root set for `None`), each
    /// with its current version, in insertion order.
    pub fn list_by_parent(
        &self,
        parent_id: Option<DbId>,
    ) -> Vec<(TopicRecord, TopicVersionRecord)> {
        let db = self.db.read();
        db.topics
            .find(|t| t.parent_topic_id == parent_id && !t.is_deleted())
            .into_iter()
            .filter_map(|t| {
                let version = Self::current_version(&db, t)?.clone();
                Some((t.clone(), version))
            })
            .collect()
    }

    /// Live children of a topic, in insertion order.
    pub fn get_children(&self, parent_id: DbId) -> Vec<TopicRecord> {
        let db = self.db.read();
        db.topics
            .find(|t| t.parent_topic_id == Some(parent_id) && !t.is_deleted())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Append the next version to a live topic.
    ///
    /// A rename re-checks sibling uniqueness against the topic's current
    /// siblings (excluding itself); on violation nothing is written. The
    /// numbering and patch-merge are delegated to the ledger rebuilt from
    /// the stored history.
    pub fn append_version(
        &self,
        topic_id: DbId,
        patch: &TopicPatch,
    ) -> Result<TopicVersionRecord, CoreError> {
        let mut db = self.db.write();
        let topic = match Self::live_topic(&db, topic_id) {
            Some(t) => t.clone(),
            None => return Err(CoreError::TopicNotFound { id: topic_id }),
        };
        if let Some(name) = &patch.name {
            if Self::has_sibling_named(&db, topic.parent_topic_id, name, Some(topic_id)) {
                return Err(CoreError::DuplicateSiblingName { name: name.clone() });
            }
        }

        let mut ledger = Self::ledger_for(&db, topic_id)?;
        if ledger.latest_number() == 0 {
            return Err(CoreError::TopicNotFound { id: topic_id });
        }
        let next = ledger.create_next(patch)?;
        let record = TopicVersionRecord::from_version(topic_id, &next);
        db.topic_versions.insert(record.clone());

        let mut updated = topic;
        updated.current_version = next.version;
        updated.updated_at = next.updated_at;
        db.topics.update(updated);

        tracing::debug!(topic_id = %topic_id, version = next.version, "Appended topic version");
        Ok(record)
    }

    /// Soft-delete a topic. `false` if it is missing or already deleted.
    ///
    /// With `cascade_soft_delete` set, all live descendants are marked in
    /// the same lock scope. Resources are never cascaded.
    pub fn soft_delete(&self, topic_id: DbId) -> bool {
        let mut db = self.db.write();
        let mut topic = match db.topics.get(topic_id) {
            Some(t) if !t.is_deleted() => t.clone(),
            _ => return false,
        };
        let now = Utc::now();
        topic.deleted_at = Some(now);
        db.topics.update(topic);

        let mut cascaded = 0usize;
        if self.config.cascade_soft_delete {
            let mut queue = VecDeque::from([topic_id]);
            while let Some(current) = queue.pop_front() {
                let children: Vec<TopicRecord> = db
                    .topics
                    .find(|t| t.parent_topic_id == Some(current) && !t.is_deleted())
                    .into_iter()
                    .cloned()
                    .collect();
                for mut child in children {
                    queue.push_back(child.id);
                    child.deleted_at = Some(now);
                    db.topics.update(child);
                    cascaded += 1;
                }
            }
        }

        tracing::info!(topic_id = %topic_id, cascaded, "Soft-deleted topic");
        true
    }

    /// All versions of a live topic, newest first. `None` if the topic is
    /// missing or deleted.
    pub fn list_versions(&self, topic_id: DbId) -> Option<Vec<TopicVersionRecord>> {
        let db = self.db.read();
        Self::live_topic(&db, topic_id)?;
        let mut versions: Vec<TopicVersionRecord> = db
            .topic_versions
            .find(|v| v.topic_id == topic_id)
            .into_iter()
            .cloned()
            .collect();
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Some(versions)
    }

    /// A specific version of a live topic.
    pub fn get_version(&self, topic_id: DbId, version: u32) -> Option<TopicVersionRecord> {
        let db = self.db.read();
        Self::live_topic(&db, topic_id)?;
        db.topic_versions
            .find_one(|v| v.topic_id == topic_id && v.version == version)
            .cloned()
    }

    /// Highest version number stored for a topic, 0 when none exist.
    pub fn latest_version_number(&self, topic_id: DbId) -> u32 {
        let db = self.db.read();
        db.topic_versions
            .find(|v| v.topic_id == topic_id)
            .into_iter()
            .map(|v| v.version)
            .max()
            .unwrap_or(0)
    }

    fn insert_topic(
        db: &mut Database,
        parent_id: Option<DbId>,
        params: CreateTopic,
    ) -> Result<(TopicRecord, TopicVersionRecord), CoreError> {
        if Self::has_sibling_named(db, parent_id, &params.name, None) {
            return Err(CoreError::DuplicateSiblingName { name: params.name });
        }
        let id = params.id.unwrap_or_else(Uuid::new_v4);
        if db.topics.get(id).is_some() {
            return Err(CoreError::Conflict(format!("Topic id already exists: {id}")));
        }

        let mut ledger = VersionLedger::new();
        let initial = ledger.create_initial(TopicSnapshot {
            name: params.name,
            content: params.content,
        });
        let topic = TopicRecord {
            id,
            parent_topic_id: parent_id,
            current_version: 1,
            created_at: initial.created_at,
            updated_at: initial.created_at,
            deleted_at: None,
        };
        let version = TopicVersionRecord::from_version(id, &initial);
        db.topics.insert(topic.clone());
        db.topic_versions.insert(version.clone());

        tracing::debug!(topic_id = %id, name = %version.name, root = parent_id.is_none(), "Created topic");
        Ok((topic, version))
    }

    fn live_topic(db: &Database, id: DbId) -> Option<&TopicRecord> {
        db.topics.get(id).filter(|t| !t.is_deleted())
    }

    fn current_version<'a>(db: &'a Database, topic: &TopicRecord) -> Option<&'a TopicVersionRecord> {
        db.topic_versions
            .find_one(|v| v.topic_id == topic.id && v.version == topic.current_version)
    }

    /// Exact-match scan over the live siblings of `(parent_id)`, resolving
    /// each sibling's current version name. No case folding, no
    /// normalization.
    fn has_sibling_named(
        db: &Database,
        parent_id: Option<DbId>,
        name: &str,
        except: Option<DbId>,
    ) -> bool {
        db.topics
            .find(|t| {
                t.parent_topic_id == parent_id && !t.is_deleted() && except != Some(t.id)
            })
            .into_iter()
            .any(|t| {
                Self::current_version(db, t).map(|v| v.name.as_str()) == Some(name)
            })
    }

    /// Rebuild the version ledger for a topic from its stored rows.
    fn ledger_for(db: &Database, topic_id: DbId) -> Result<VersionLedger<TopicSnapshot>, CoreError> {
        let mut versions: Vec<_> = db
            .topic_versions
            .find(|v| v.topic_id == topic_id)
            .into_iter()
            .map(|v| v.to_version())
            .collect();
        versions.sort_by_key(|v| v.version);
        VersionLedger::from_history(versions)
    }
}
