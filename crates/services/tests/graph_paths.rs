//! Integration tests for shortest-path queries over the topic graph.
//!
//! Builds small forests through the repository and verifies the BFS
//! contract: singleton self-paths, root-to-leaf paths, sibling paths via
//! the common parent, disconnected trees, and soft-deleted nodes treated
//! as absent.

use assert_matches::assert_matches;
use kbase_core::error::CoreError;
use kbase_core::topic::TopicPatch;
use kbase_db::models::topic::CreateTopic;
use kbase_db::repositories::TopicRepo;
use kbase_db::store::SharedDatabase;
use kbase_services::TopicGraphService;
use uuid::Uuid;

fn setup() -> (TopicRepo, TopicGraphService) {
    let repo = TopicRepo::new(SharedDatabase::new());
    let graph = TopicGraphService::new(repo.clone());
    (repo, graph)
}

/// Root A, child B, grandchild C, plus an unrelated root D.
fn chain(repo: &TopicRepo) -> (Uuid, Uuid, Uuid, Uuid) {
    let (a, _) = repo.create_root(CreateTopic::new("A", "a")).unwrap();
    let (b, _) = repo.create_child(a.id, CreateTopic::new("B", "b")).unwrap();
    let (c, _) = repo.create_child(b.id, CreateTopic::new("C", "c")).unwrap();
    let (d, _) = repo.create_root(CreateTopic::new("D", "d")).unwrap();
    (a.id, b.id, c.id, d.id)
}

#[test]
fn test_self_path_is_a_singleton() {
    let (repo, graph) = setup();
    let (a, _, _, _) = chain(&repo);

    let path = graph.shortest_path(a, a).unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].id, a);
    assert_eq!(path[0].name, "A");
    assert_eq!(path[0].version, 1);
}

#[test]
fn test_self_path_on_unknown_id_fails() {
    let (_, graph) = setup();
    let fake = Uuid::new_v4();
    assert_matches!(
        graph.shortest_path(fake, fake),
        Err(CoreError::TopicNotFound { id }) if id == fake
    );
}

#[test]
fn test_root_to_grandchild_path() {
    let (repo, graph) = setup();
    let (a, b, c, _) = chain(&repo);

    let path = graph.shortest_path(a, c).unwrap();
    let ids: Vec<Uuid> = path.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a, b, c]);
    let names: Vec<&str> = path.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_path_is_symmetric_in_length() {
    let (repo, graph) = setup();
    let (a, _, c, _) = chain(&repo);

    let down = graph.shortest_path(a, c).unwrap();
    let up = graph.shortest_path(c, a).unwrap();
    assert_eq!(down.len(), 3);
    assert_eq!(up.len(), 3);
    assert_eq!(up.first().unwrap().id, c);
    assert_eq!(up.last().unwrap().id, a);
}

#[test]
fn test_sibling_path_goes_through_parent() {
    let (repo, graph) = setup();
    let (a, _) = repo.create_root(CreateTopic::new("A", "a")).unwrap();
    let (left, _) = repo.create_child(a.id, CreateTopic::new("Left", "l")).unwrap();
    let (right, _) = repo.create_child(a.id, CreateTopic::new("Right", "r")).unwrap();

    let path = graph.shortest_path(left.id, right.id).unwrap();
    let ids: Vec<Uuid> = path.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![left.id, a.id, right.id]);
}

#[test]
fn test_disconnected_roots_have_no_path() {
    let (repo, graph) = setup();
    let (a, _, _, d) = chain(&repo);

    assert_matches!(
        graph.shortest_path(a, d),
        Err(CoreError::NoPath { from, to }) if from == a && to == d
    );
}

#[test]
fn test_unknown_endpoint_fails_before_search() {
    let (repo, graph) = setup();
    let (a, _, _, _) = chain(&repo);
    let fake = Uuid::new_v4();

    assert_matches!(graph.shortest_path(a, fake), Err(CoreError::TopicNotFound { .. }));
    assert_matches!(graph.shortest_path(fake, a), Err(CoreError::TopicNotFound { .. }));
}

#[test]
fn test_deleted_topic_is_absent_from_the_graph() {
    let (repo, graph) = setup();
    let (a, b, c, _) = chain(&repo);

    assert!(repo.soft_delete(b));

    // As an endpoint it no longer resolves.
    assert_matches!(graph.shortest_path(a, b), Err(CoreError::TopicNotFound { .. }));
    // As the only link between A and C its removal disconnects them.
    assert_matches!(graph.shortest_path(a, c), Err(CoreError::NoPath { .. }));
}

#[test]
fn test_path_nodes_resolve_current_versions() {
    let (repo, graph) = setup();
    let (a, b, _, _) = chain(&repo);

    repo.append_version(
        b,
        &TopicPatch {
            name: Some("B-renamed".to_string()),
            content: None,
        },
    )
    .unwrap();

    let path = graph.shortest_path(a, b).unwrap();
    assert_eq!(path[1].name, "B-renamed");
    assert_eq!(path[1].version, 2);
}
