//! End-to-end scenarios for the `kindred-graph` aggregate.
//!
//! Each test builds a small family through the public API and checks the
//! outcome a tree editor would see.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use chrono::NaiveDate;
use kindred_graph::{GenealogyErrorKind, GenealogyGraph};
use kindred_types::{PersonId, PersonRecord, RelationshipKind, TreeId, ViewMode};

fn id(s: &str) -> PersonId {
    PersonId::new(s).unwrap()
}

fn tree(names: &[&str]) -> GenealogyGraph {
    let mut graph = GenealogyGraph::new(TreeId::new("family").unwrap());
    for name in names {
        graph.add_person(PersonRecord::named(id(name), *name)).unwrap();
    }
    graph
}

#[test]
fn reverse_link_is_a_cycle() {
    let mut graph = tree(&["a", "b"]);
    graph.add_parent_child_relationship(&id("a"), &id("b")).unwrap();

    let err = graph
        .add_parent_child_relationship(&id("b"), &id("a"))
        .unwrap_err();
    assert_eq!(err.kind(), GenealogyErrorKind::CycleDetected);
    assert_eq!(graph.parent_child_edges().len(), 1);
}

#[test]
fn third_parent_is_rejected() {
    let mut graph = tree(&["a", "b", "c"]);
    graph.add_parent_child_relationship(&id("a"), &id("c")).unwrap();
    graph.add_parent_child_relationship(&id("b"), &id("c")).unwrap();
    graph.add_person(PersonRecord::named(id("d"), "D")).unwrap();

    let err = graph
        .add_parent_child_relationship(&id("d"), &id("c"))
        .unwrap_err();
    assert_eq!(err.kind(), GenealogyErrorKind::ParentLimitExceeded);
    assert_eq!(graph.get_parents(&id("c")).unwrap(), vec![id("a"), id("b")]);
}

#[test]
fn parent_born_after_child_is_rejected() {
    let mut graph = GenealogyGraph::new(TreeId::new("family").unwrap());
    let mut parent = PersonRecord::named(id("parent"), "Parent");
    parent.birth_date = NaiveDate::from_ymd_opt(2000, 1, 1);
    let mut child = PersonRecord::named(id("child"), "Child");
    child.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
    graph.add_person(parent).unwrap();
    graph.add_person(child).unwrap();

    let err = graph
        .add_parent_child_relationship(&id("parent"), &id("child"))
        .unwrap_err();
    assert_eq!(err.kind(), GenealogyErrorKind::AgeInconsistency);
    assert!(graph.parent_child_edges().is_empty());
}

#[test]
fn spouse_must_be_unlinked_before_removal() {
    let mut graph = tree(&["x", "y"]);
    graph.add_spouse_relationship(&id("x"), &id("y")).unwrap();

    let err = graph.remove_person(&id("x")).unwrap_err();
    assert_eq!(err.kind(), GenealogyErrorKind::PersonHasRelationships);

    assert_eq!(
        graph.remove_relationship(&id("x"), &id("y")).unwrap(),
        RelationshipKind::Spouse
    );
    graph.remove_person(&id("x")).unwrap();
    assert_eq!(graph.person_count(), 1);
    assert!(graph.get_spouses(&id("y")).unwrap().is_empty());
}

#[test]
fn render_keeps_edges_of_unreached_component() {
    let mut graph = tree(&["root", "kid", "other_parent", "other_kid", "lone_a", "lone_b"]);
    graph
        .add_parent_child_relationship(&id("root"), &id("kid"))
        .unwrap();
    graph
        .add_parent_child_relationship(&id("other_parent"), &id("other_kid"))
        .unwrap();
    graph
        .add_spouse_relationship(&id("lone_a"), &id("lone_b"))
        .unwrap();

    let rendered = graph.render_tree(&id("root"), ViewMode::Radial).unwrap();

    let node_ids: Vec<&PersonId> = rendered.nodes.iter().map(|n| &n.person.person_id).collect();
    assert_eq!(node_ids, vec![&id("root"), &id("kid")]);
    assert_eq!(rendered.nodes[0].level, 0);
    assert_eq!(rendered.nodes[1].level, 1);
    assert_eq!(rendered.view_mode, ViewMode::Radial);
    assert_eq!(rendered.edges.len(), 3);
    assert!(
        rendered
            .edges
            .iter()
            .any(|e| e.from == id("other_parent") && e.to == id("other_kid"))
    );
}

#[test]
fn render_levels_follow_generations_both_ways() {
    let mut graph = tree(&["grandma", "mum", "me", "son", "aunt"]);
    graph
        .add_parent_child_relationship(&id("grandma"), &id("mum"))
        .unwrap();
    graph
        .add_parent_child_relationship(&id("grandma"), &id("aunt"))
        .unwrap();
    graph.add_parent_child_relationship(&id("mum"), &id("me")).unwrap();
    graph.add_parent_child_relationship(&id("me"), &id("son")).unwrap();

    let rendered = graph.render_tree(&id("me"), ViewMode::default()).unwrap();
    let level_of = |name: &str| {
        rendered
            .nodes
            .iter()
            .find(|n| n.person.person_id == id(name))
            .map(|n| n.level)
    };

    assert_eq!(level_of("me"), Some(0));
    assert_eq!(level_of("son"), Some(1));
    assert_eq!(level_of("mum"), Some(-1));
    assert_eq!(level_of("grandma"), Some(-2));
    assert_eq!(level_of("aunt"), Some(-1));
    assert_eq!(rendered.root_person_id, id("me"));
}

#[test]
fn snapshot_survives_json_and_replay() {
    let mut graph = tree(&["a", "b", "c"]);
    graph.add_parent_child_relationship(&id("a"), &id("c")).unwrap();
    graph.add_spouse_relationship(&id("b"), &id("a")).unwrap();

    let json = serde_json::to_string(&graph.to_snapshot()).unwrap();
    let restored = GenealogyGraph::from_snapshot(serde_json::from_str(&json).unwrap()).unwrap();

    assert_eq!(restored, graph);
    assert_eq!(restored.get_ancestors(&id("c")).unwrap(), vec![id("a")]);
}
