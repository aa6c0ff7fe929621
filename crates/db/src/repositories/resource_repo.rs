//! Repository for topic resources.

use chrono::Utc;
use kbase_core::types::DbId;
use uuid::Uuid;

use crate::models::resource::{CreateResource, ResourceRecord, UpdateResource};
use crate::store::SharedDatabase;

/// Provides resource CRUD over the shared store. Ownership checks against
/// the owning topic belong to the service layer.
#[derive(Debug, Clone)]
pub struct ResourceRepo {
    db: SharedDatabase,
}

impl ResourceRepo {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }

    pub fn create(&self, params: CreateResource) -> ResourceRecord {
        let now = Utc::now();
        let record = ResourceRecord {
            id: Uuid::new_v4(),
            topic_id: params.topic_id,
            url: params.url,
            description: params.description,
            kind: params.kind,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let mut db = self.db.write();
        db.resources.insert(record.clone());
        tracing::debug!(resource_id = %record.id, topic_id = %record.topic_id, "Created resource");
        record
    }

    /// A live resource by id.
    pub fn get_by_id(&self, id: DbId) -> Option<ResourceRecord> {
        let db = self.db.read();
        db.resources.get(id).filter(|r| !r.is_deleted()).cloned()
    }

    /// Live resources of a topic, in insertion order.
    pub fn list_by_topic(&self, topic_id: DbId) -> Vec<ResourceRecord> {
        let db = self.db.read();
        db.resources
            .find(|r| r.topic_id == topic_id && !r.is_deleted())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Apply the given fields to a live resource. `None` if it is missing
    /// or deleted.
    pub fn update(&self, id: DbId, update: &UpdateResource) -> Option<ResourceRecord> {
        let mut db = self.db.write();
        let mut record = db.resources.get(id).filter(|r| !r.is_deleted())?.clone();
        if let Some(url) = &update.url {
            record.url = url.clone();
        }
        if let Some(description) = &update.description {
            record.description = Some(description.clone());
        }
        if let Some(kind) = &update.kind {
            record.kind = kind.clone();
        }
        record.updated_at = Utc::now();
        db.resources.update(record.clone());
        Some(record)
    }

    /// Soft-delete a resource. `false` if missing or already deleted.
    pub fn soft_delete(&self, id: DbId) -> bool {
        let mut db = self.db.write();
        let mut record = match db.resources.get(id) {
            Some(r) if !r.is_deleted() => r.clone(),
            _ => return false,
        };
        record.deleted_at = Some(Utc::now());
        db.resources.update(record);
        tracing::info!(resource_id = %id, "Soft-deleted resource");
        true
    }
}
