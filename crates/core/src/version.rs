//! Generic append-only version ledger.
//!
//! One ledger holds the ordered, immutable history of snapshots for a
//! single entity. Version numbers are dense: the first snapshot is version
//! 1 and every update appends exactly the next number. `created_at` is
//! fixed by version 1 and copied onto every later version; `updated_at` is
//! the append time of each snapshot. The ledger only ever hands out owned
//! clones, so a snapshot returned earlier can never be altered by later
//! appends.

use chrono::Utc;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Data type that can live in a [`VersionLedger`].
///
/// `merge` produces the successor snapshot: fields present in the patch
/// replace the previous values, absent fields carry forward unchanged.
pub trait Snapshot: Clone {
    type Patch;

    fn merge(&self, patch: &Self::Patch) -> Self;
}

/// A single immutable snapshot in a ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Version<T> {
    pub version: u32,
    pub data: T,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

/// Selects a version out of a ledger: an explicit number or the latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelector {
    Latest,
    Number(u32),
}

/// Ordered, append-only history of [`Version`] snapshots for one entity.
#[derive(Debug, Clone, Default)]
pub struct VersionLedger<T: Snapshot> {
    versions: Vec<Version<T>>,
}

impl<T: Snapshot> VersionLedger<T> {
    /// An empty ledger. The first call must be [`create_initial`].
    ///
    /// [`create_initial`]: VersionLedger::create_initial
    pub fn new() -> Self {
        Self {
            versions: Vec::new(),
        }
    }

    /// Rebuild a ledger from previously stored versions, oldest first.
    ///
    /// Revalidates the dense 1..N numbering; a gap or misordering is a
    /// data-integrity fault, not a caller error.
    pub fn from_history(versions: Vec<Version<T>>) -> Result<Self, CoreError> {
        for (i, v) in versions.iter().enumerate() {
            let expected = (i + 1) as u32;
            if v.version != expected {
                return Err(CoreError::Internal(format!(
                    "version history is not dense: expected {expected}, found {}",
                    v.version
                )));
            }
        }
        Ok(Self { versions })
    }

    /// Append version 1.
    ///
    /// Calling this on a non-empty ledger is a programmer error and
    /// panics; the creation contract guarantees exactly one initial
    /// version per entity.
    pub fn create_initial(&mut self, data: T) -> Version<T> {
        assert!(
            self.versions.is_empty(),
            "initial version already exists in ledger"
        );
        let now = Utc::now();
        let v = Version {
            version: 1,
            data,
            created_at: now,
            updated_at: now,
        };
        self.versions.push(v.clone());
        v
    }

    /// Append the next version by merging `patch` over the latest snapshot.
    ///
    /// `created_at` is copied from the previous version, `updated_at` is
    /// the append time.
    pub fn create_next(&mut self, patch: &T::Patch) -> Result<Version<T>, CoreError> {
        let prev = self.latest()?;
        let next = Version {
            version: prev.version + 1,
            data: prev.data.merge(patch),
            created_at: prev.created_at,
            updated_at: Utc::now(),
        };
        self.versions.push(next.clone());
        Ok(next)
    }

    /// The most recent version.
    pub fn latest(&self) -> Result<Version<T>, CoreError> {
        self.versions
            .last()
            .cloned()
            .ok_or(CoreError::VersionNotFound { version: 1 })
    }

    /// A specific version by selector.
    pub fn get(&self, selector: VersionSelector) -> Result<Version<T>, CoreError> {
        match selector {
            VersionSelector::Latest => self.latest(),
            VersionSelector::Number(n) => self
                .versions
                .iter()
                .find(|v| v.version == n)
                .cloned()
                .ok_or(CoreError::VersionNotFound { version: n }),
        }
    }

    /// All versions, oldest first. Returns owned clones.
    pub fn list(&self) -> Vec<Version<T>> {
        self.versions.clone()
    }

    /// The highest version number, or 0 for an empty ledger.
    pub fn latest_number(&self) -> u32 {
        self.versions.last().map(|v| v.version).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::topic::{TopicPatch, TopicSnapshot};

    fn snapshot(name: &str, content: &str) -> TopicSnapshot {
        TopicSnapshot {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_initial_version_is_one() {
        let mut ledger = VersionLedger::new();
        let v = ledger.create_initial(snapshot("Root", "hello"));
        assert_eq!(v.version, 1);
        assert_eq!(v.created_at, v.updated_at);
        assert_eq!(ledger.latest_number(), 1);
    }

    #[test]
    #[should_panic(expected = "initial version already exists")]
    fn test_second_initial_version_panics() {
        let mut ledger = VersionLedger::new();
        ledger.create_initial(snapshot("Root", "hello"));
        ledger.create_initial(snapshot("Root", "again"));
    }

    #[test]
    fn test_next_version_merges_patch_over_previous() {
        let mut ledger = VersionLedger::new();
        ledger.create_initial(snapshot("Root", "v1"));
        let v2 = ledger
            .create_next(&TopicPatch {
                name: None,
                content: Some("v2".to_string()),
            })
            .unwrap();
        assert_eq!(v2.version, 2);
        assert_eq!(v2.data.name, "Root");
        assert_eq!(v2.data.content, "v2");
    }

    #[test]
    fn test_created_at_is_shared_across_versions() {
        let mut ledger = VersionLedger::new();
        let v1 = ledger.create_initial(snapshot("Root", "v1"));
        let v2 = ledger
            .create_next(&TopicPatch {
                name: Some("Renamed".to_string()),
                content: None,
            })
            .unwrap();
        let v3 = ledger
            .create_next(&TopicPatch {
                name: None,
                content: Some("v3".to_string()),
            })
            .unwrap();
        assert_eq!(v1.created_at, v2.created_at);
        assert_eq!(v1.created_at, v3.created_at);
        assert!(v3.updated_at >= v1.updated_at);
    }

    #[test]
    fn test_version_numbers_are_dense() {
        let mut ledger = VersionLedger::new();
        ledger.create_initial(snapshot("Root", "v1"));
        for i in 2..=6u32 {
            let v = ledger
                .create_next(&TopicPatch {
                    name: None,
                    content: Some(format!("v{i}")),
                })
                .unwrap();
            assert_eq!(v.version, i);
        }
        let numbers: Vec<u32> = ledger.list().iter().map(|v| v.version).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_get_by_selector() {
        let mut ledger = VersionLedger::new();
        ledger.create_initial(snapshot("Root", "v1"));
        ledger
            .create_next(&TopicPatch {
                name: None,
                content: Some("v2".to_string()),
            })
            .unwrap();

        assert_eq!(ledger.get(VersionSelector::Latest).unwrap().version, 2);
        assert_eq!(ledger.get(VersionSelector::Number(1)).unwrap().version, 1);
        assert_matches!(
            ledger.get(VersionSelector::Number(3)),
            Err(CoreError::VersionNotFound { version: 3 })
        );
        assert_matches!(
            ledger.get(VersionSelector::Number(0)),
            Err(CoreError::VersionNotFound { version: 0 })
        );
    }

    #[test]
    fn test_latest_on_empty_ledger_fails() {
        let ledger: VersionLedger<TopicSnapshot> = VersionLedger::new();
        assert_matches!(ledger.latest(), Err(CoreError::VersionNotFound { .. }));
        assert_eq!(ledger.latest_number(), 0);
    }

    #[test]
    fn test_returned_snapshots_are_detached_from_ledger() {
        let mut ledger = VersionLedger::new();
        let v1 = ledger.create_initial(snapshot("Root", "v1"));
        ledger
            .create_next(&TopicPatch {
                name: Some("Changed".to_string()),
                content: Some("v2".to_string()),
            })
            .unwrap();

        // The snapshot handed out before the append is untouched.
        assert_eq!(v1.data.name, "Root");
        assert_eq!(v1.data.content, "v1");

        // Mutating a listed copy does not reach the ledger.
        let mut listed = ledger.list();
        listed[0].data.name = "Mutated".to_string();
        assert_eq!(ledger.get(VersionSelector::Number(1)).unwrap().data.name, "Root");
    }

    #[test]
    fn test_from_history_accepts_dense_numbering() {
        let mut ledger = VersionLedger::new();
        ledger.create_initial(snapshot("Root", "v1"));
        ledger
            .create_next(&TopicPatch {
                name: None,
                content: Some("v2".to_string()),
            })
            .unwrap();

        let rebuilt = VersionLedger::from_history(ledger.list()).unwrap();
        assert_eq!(rebuilt.latest_number(), 2);
        assert_eq!(rebuilt.latest().unwrap().data.content, "v2");
    }

    #[test]
    fn test_from_history_rejects_gaps() {
        let mut ledger = VersionLedger::new();
        ledger.create_initial(snapshot("Root", "v1"));
        ledger
            .create_next(&TopicPatch {
                name: None,
                content: Some("v2".to_string()),
            })
            .unwrap();

        let mut history = ledger.list();
        history.remove(0);
        assert_matches!(
            VersionLedger::from_history(history),
            Err(CoreError::Internal(_))
        );
    }
}
