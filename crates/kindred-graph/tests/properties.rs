//! Property tests for the `kindred-graph` invariants.
//!
//! Operations are generated over a small pool of person IDs so that
//! duplicates, cycles and parent-limit collisions come up often.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc
)]

use std::collections::{BTreeMap, BTreeSet};

use kindred_graph::{GenealogyErrorKind, GenealogyGraph, MAX_PARENTS};
use kindred_types::{PersonId, PersonRecord, TreeId};
use proptest::prelude::*;

const POOL: usize = 8;

fn id(n: usize) -> PersonId {
    PersonId::new(format!("p{n}")).unwrap()
}

fn populated() -> GenealogyGraph {
    let mut graph = GenealogyGraph::new(TreeId::new("prop").unwrap());
    for n in 0..POOL {
        graph
            .add_person(PersonRecord::named(id(n), format!("Person {n}")))
            .unwrap();
    }
    graph
}

#[derive(Debug, Clone)]
enum Op {
    ParentChild(usize, usize),
    Spouse(usize, usize),
    Remove(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..POOL, 0..POOL).prop_map(|(a, b)| Op::ParentChild(a, b)),
        1 => (0..POOL, 0..POOL).prop_map(|(a, b)| Op::Spouse(a, b)),
        1 => (0..POOL, 0..POOL).prop_map(|(a, b)| Op::Remove(a, b)),
    ]
}

fn apply(graph: &mut GenealogyGraph, op: &Op) -> bool {
    match *op {
        Op::ParentChild(p, c) => graph.add_parent_child_relationship(&id(p), &id(c)).is_ok(),
        Op::Spouse(a, b) => graph.add_spouse_relationship(&id(a), &id(b)).is_ok(),
        Op::Remove(a, b) => graph.remove_relationship(&id(a), &id(b)).is_ok(),
    }
}

fn has_cycle(graph: &GenealogyGraph) -> bool {
    let mut children: BTreeMap<PersonId, Vec<PersonId>> = BTreeMap::new();
    for edge in graph.parent_child_edges() {
        children
            .entry(edge.parent().clone())
            .or_default()
            .push(edge.child().clone());
    }
    // Kahn's algorithm: a cycle leaves nodes with positive in-degree.
    let mut indegree: BTreeMap<PersonId, usize> =
        graph.persons().map(|p| (p.id().clone(), 0)).collect();
    for edge in graph.parent_child_edges() {
        *indegree.get_mut(edge.child()).unwrap() += 1;
    }
    let mut ready: Vec<PersonId> = indegree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(k, _)| k.clone())
        .collect();
    let mut seen = 0;
    while let Some(node) = ready.pop() {
        seen += 1;
        for child in children.get(&node).into_iter().flatten() {
            let d = indegree.get_mut(child).unwrap();
            *d -= 1;
            if *d == 0 {
                ready.push(child.clone());
            }
        }
    }
    seen != indegree.len()
}

proptest! {
    #[test]
    fn person_count_matches_distinct_adds(ids in proptest::collection::vec(0..20usize, 0..40)) {
        let mut graph = GenealogyGraph::new(TreeId::new("prop").unwrap());
        let mut distinct = BTreeSet::new();
        for n in ids {
            let result = graph.add_person(PersonRecord::named(id(n), "Someone")).map(|_| ());
            if distinct.insert(n) {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result.unwrap_err().kind(), GenealogyErrorKind::DuplicatePerson);
            }
            prop_assert_eq!(graph.person_count(), distinct.len());
        }
    }

    #[test]
    fn invariants_hold_after_any_sequence(ops in proptest::collection::vec(op(), 0..60)) {
        let mut graph = populated();
        for op in &ops {
            let before = graph.clone();
            let accepted = apply(&mut graph, op);
            if !accepted {
                prop_assert_eq!(&graph, &before);
            }
            if accepted && let Op::ParentChild(p, c) = *op {
                prop_assert!(graph.get_ancestors(&id(c)).unwrap().contains(&id(p)));
                prop_assert!(graph.get_descendants(&id(p)).unwrap().contains(&id(c)));
            }
        }

        prop_assert!(!has_cycle(&graph));
        for n in 0..POOL {
            prop_assert!(graph.get_parents(&id(n)).unwrap().len() <= MAX_PARENTS);
            for spouse in graph.get_spouses(&id(n)).unwrap() {
                prop_assert!(graph.get_spouses(&spouse).unwrap().contains(&id(n)));
            }
            let ancestors = graph.get_ancestors(&id(n)).unwrap();
            prop_assert!(!ancestors.contains(&id(n)));
        }
    }

    #[test]
    fn spouse_direction_is_irrelevant(a in 0..POOL, b in 0..POOL) {
        prop_assume!(a != b);
        let mut graph = populated();
        graph.add_spouse_relationship(&id(a), &id(b)).unwrap();
        let err = graph.add_spouse_relationship(&id(b), &id(a)).unwrap_err();
        prop_assert_eq!(err.kind(), GenealogyErrorKind::DuplicateRelationship);
    }

    #[test]
    fn removal_requires_no_incident_edges(ops in proptest::collection::vec(op(), 0..30), target in 0..POOL) {
        let mut graph = populated();
        for op in &ops {
            apply(&mut graph, op);
        }
        let linked = !graph.get_parents(&id(target)).unwrap().is_empty()
            || !graph.get_children(&id(target)).unwrap().is_empty()
            || !graph.get_spouses(&id(target)).unwrap().is_empty();

        match graph.remove_person(&id(target)) {
            Ok(_) => {
                prop_assert!(!linked);
                prop_assert_eq!(
                    graph.get_person(&id(target)).unwrap_err().kind(),
                    GenealogyErrorKind::NotFound
                );
            }
            Err(err) => {
                prop_assert!(linked);
                prop_assert_eq!(err.kind(), GenealogyErrorKind::PersonHasRelationships);
            }
        }
    }

    #[test]
    fn snapshot_replay_reproduces_the_graph(ops in proptest::collection::vec(op(), 0..60)) {
        let mut graph = populated();
        for op in &ops {
            apply(&mut graph, op);
        }
        let mut snapshot = graph.to_snapshot();
        snapshot.persons.reverse();
        snapshot.parent_child.reverse();
        snapshot.spouses.reverse();

        let restored = GenealogyGraph::from_snapshot(snapshot).unwrap();
        prop_assert_eq!(restored.to_snapshot(), graph.to_snapshot());
    }
}
