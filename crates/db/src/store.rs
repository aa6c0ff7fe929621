//! Indexed in-memory collections and the shared database handle.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use kbase_core::types::DbId;

use crate::models::resource::ResourceRecord;
use crate::models::topic::{TopicRecord, TopicVersionRecord};
use crate::models::user::UserRecord;

/// A record that can live in a [`Collection`].
pub trait Record {
    fn id(&self) -> DbId;
}

/// An ordered collection of records with a unique-id index.
///
/// Rows keep insertion order; `update` replaces a row in place, so order
/// is stable across updates. Inserting a duplicate id is a caller bug and
/// panics, mirroring a unique-index violation.
#[derive(Debug)]
pub struct Collection<T: Record> {
    rows: Vec<T>,
    by_id: HashMap<DbId, usize>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<T: Record + Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    pub fn insert(&mut self, record: T) {
        let id = record.id();
        assert!(
            !self.by_id.contains_key(&id),
            "duplicate id inserted into collection: {id}"
        );
        self.by_id.insert(id, self.rows.len());
        self.rows.push(record);
    }

    /// Lookup by primary key.
    pub fn get(&self, id: DbId) -> Option<&T> {
        self.by_id.get(&id).map(|&i| &self.rows[i])
    }

    /// First record matching the predicate, in insertion order.
    pub fn find_one(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.rows.iter().find(|r| pred(r))
    }

    /// All records matching the predicate, in insertion order.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Vec<&T> {
        self.rows.iter().filter(|r| pred(r)).collect()
    }

    /// Replace the record with the same id. Returns `false` if absent.
    pub fn update(&mut self, record: T) -> bool {
        match self.by_id.get(&record.id()) {
            Some(&i) => {
                self.rows[i] = record;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The four collections of the system.
#[derive(Debug, Default)]
pub struct Database {
    pub topics: Collection<TopicRecord>,
    pub topic_versions: Collection<TopicVersionRecord>,
    pub resources: Collection<ResourceRecord>,
    pub users: Collection<UserRecord>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Shared handle to one [`Database`]. Cheap to clone; every repository
/// holds one.
///
/// Writers take the lock for their whole read-check-then-write sequence,
/// so two concurrent sibling-name checks cannot both pass before either
/// write lands. Readers may run concurrently with each other.
#[derive(Debug, Clone, Default)]
pub struct SharedDatabase {
    inner: Arc<RwLock<Database>>,
}

impl SharedDatabase {
    /// A fresh, empty database. Tests create one per case for isolation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Database> {
        self.inner.read().expect("database lock poisoned")
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Database> {
        self.inner.write().expect("database lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn topic(parent: Option<DbId>) -> TopicRecord {
        let now = Utc::now();
        TopicRecord {
            id: Uuid::new_v4(),
            parent_topic_id: parent,
            current_version: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_insert_and_get_by_id() {
        let mut col = Collection::new();
        let t = topic(None);
        col.insert(t.clone());
        assert_eq!(col.get(t.id).unwrap().id, t.id);
        assert!(col.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_find_preserves_insertion_order() {
        let mut col = Collection::new();
        let a = topic(None);
        let b = topic(None);
        let c = topic(Some(a.id));
        col.insert(a.clone());
        col.insert(b.clone());
        col.insert(c.clone());

        let roots: Vec<DbId> = col
            .find(|t| t.parent_topic_id.is_none())
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(roots, vec![a.id, b.id]);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut col = Collection::new();
        let a = topic(None);
        let b = topic(None);
        col.insert(a.clone());
        col.insert(b.clone());

        let mut changed = a.clone();
        changed.current_version = 2;
        assert!(col.update(changed));
        assert_eq!(col.get(a.id).unwrap().current_version, 2);

        // Order unchanged after update.
        let all: Vec<DbId> = col.find(|_| true).iter().map(|t| t.id).collect();
        assert_eq!(all, vec![a.id, b.id]);
    }

    #[test]
    fn test_update_missing_returns_false() {
        let mut col: Collection<TopicRecord> = Collection::new();
        assert!(!col.update(topic(None)));
    }

    #[test]
    #[should_panic(expected = "duplicate id")]
    fn test_duplicate_insert_panics() {
        let mut col = Collection::new();
        let t = topic(None);
        col.insert(t.clone());
        col.insert(t);
    }
}
