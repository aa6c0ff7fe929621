//! Shortest path between two topics.
//!
//! The parent/child relation is treated as an undirected graph: an edge
//! between a topic and its parent, and between a topic and each of its
//! live children. BFS over that graph yields a shortest path; neighbor
//! order is parent first, then children in store-listing order, which
//! makes the chosen path deterministic among equal-length alternatives.

use std::collections::{HashMap, HashSet, VecDeque};

use kbase_core::error::CoreError;
use kbase_core::types::DbId;
use kbase_db::repositories::TopicRepo;
use serde::Serialize;

/// One hop on a path, resolved at the topic's current version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathNode {
    pub id: DbId,
    pub name: String,
    pub version: u32,
}

#[derive(Debug, Clone)]
pub struct TopicGraphService {
    topic_repo: TopicRepo,
}

impl TopicGraphService {
    pub fn new(topic_repo: TopicRepo) -> Self {
        Self { topic_repo }
    }

    /// The shortest path from `from` to `to`, endpoints included.
    ///
    /// Fails with `TopicNotFound` if either endpoint (or, rarely, a node
    /// resolved during reconstruction) is not a live topic, and with
    /// `NoPath` when the two live in different trees.
    pub fn shortest_path(&self, from: DbId, to: DbId) -> Result<Vec<PathNode>, CoreError> {
        if from == to {
            let single = self
                .resolve_node(from)
                .ok_or(CoreError::TopicNotFound { id: from })?;
            return Ok(vec![single]);
        }

        self.topic_repo
            .get_topic_record(from)
            .ok_or(CoreError::TopicNotFound { id: from })?;
        self.topic_repo
            .get_topic_record(to)
            .ok_or(CoreError::TopicNotFound { id: to })?;

        let mut visited = HashSet::from([from]);
        let mut predecessor: HashMap<DbId, Option<DbId>> = HashMap::from([(from, None)]);
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                return self.reconstruct_path(&predecessor, to);
            }
            for neighbor in self.neighbors(current) {
                if visited.insert(neighbor) {
                    predecessor.insert(neighbor, Some(current));
                    queue.push_back(neighbor);
                }
            }
        }

        Err(CoreError::NoPath { from, to })
    }

    /// Live neighbors of a topic: parent first (if live), then live
    /// children in store-listing order.
    fn neighbors(&self, id: DbId) -> Vec<DbId> {
        let Some(record) = self.topic_repo.get_topic_record(id) else {
            return Vec::new();
        };
        let mut result = Vec::new();
        if let Some(parent_id) = record.parent_topic_id {
            if self.topic_repo.get_topic_record(parent_id).is_some() {
                result.push(parent_id);
            }
        }
        for child in self.topic_repo.get_children(id) {
            result.push(child.id);
        }
        result
    }

    fn reconstruct_path(
        &self,
        predecessor: &HashMap<DbId, Option<DbId>>,
        end: DbId,
    ) -> Result<Vec<PathNode>, CoreError> {
        let mut ids = Vec::new();
        let mut current = Some(end);
        while let Some(id) = current {
            ids.push(id);
            current = predecessor.get(&id).copied().flatten();
        }
        ids.reverse();
        ids.into_iter()
            .map(|id| {
                self.resolve_node(id)
                    .ok_or(CoreError::TopicNotFound { id })
            })
            .collect()
    }

    fn resolve_node(&self, id: DbId) -> Option<PathNode> {
        let (_, version) = self.topic_repo.get_by_id(id)?;
        Some(PathNode {
            id,
            name: version.name,
            version: version.version,
        })
    }
}
