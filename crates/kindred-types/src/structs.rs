//! Flattened record types exchanged with storage, importers, and renderers.
//!
//! These are plain data: nothing here enforces graph invariants. The
//! `kindred-graph` crate validates every record before it becomes part of
//! an aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Gender, RelationshipKind, ViewMode};
use crate::ids::{PersonId, TreeId};

// ---------------------------------------------------------------------------
// Persons and edges
// ---------------------------------------------------------------------------

/// Unvalidated biographical record of a person.
///
/// Used both as the input to `add_person` and as the flattened form written
/// to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PersonRecord {
    /// Identity of the person within the tree.
    pub person_id: PersonId,
    /// Display name.
    pub name: String,
    /// Recorded gender.
    #[serde(default)]
    pub gender: Gender,
    /// Date of birth, if known.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Place of birth, if known.
    #[serde(default)]
    pub birth_place: Option<String>,
    /// Date of death, if known.
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
}

impl PersonRecord {
    /// Record with only the required fields set.
    pub fn named(person_id: PersonId, name: impl Into<String>) -> Self {
        Self {
            person_id,
            name: name.into(),
            gender: Gender::Unknown,
            birth_date: None,
            birth_place: None,
            death_date: None,
        }
    }
}

/// Directed parent-to-child edge as stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ParentChildRecord {
    /// The parent.
    pub parent_id: PersonId,
    /// The child.
    pub child_id: PersonId,
}

/// Spouse edge as stored, with `person_a <= person_b`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpouseRecord {
    /// Lower of the two IDs.
    pub person_a: PersonId,
    /// Higher of the two IDs.
    pub person_b: PersonId,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Flattened contents of one tree, as handed to and from persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TreeSnapshot {
    /// The tree this snapshot belongs to.
    pub tree_id: TreeId,
    /// All persons.
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
    /// All directed parent-child edges.
    #[serde(default)]
    pub parent_child: Vec<ParentChildRecord>,
    /// All canonical spouse edges.
    #[serde(default)]
    pub spouses: Vec<SpouseRecord>,
}

impl TreeSnapshot {
    /// Snapshot of a tree with no persons and no edges.
    pub const fn empty(tree_id: TreeId) -> Self {
        Self {
            tree_id,
            persons: Vec::new(),
            parent_child: Vec::new(),
            spouses: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Render payload
// ---------------------------------------------------------------------------

/// A person placed at a generation level relative to the render root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RenderNode {
    /// The person's data.
    pub person: PersonRecord,
    /// Signed generation offset: root is 0, children +1, parents -1.
    pub level: i32,
}

/// An edge in the render payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RenderEdge {
    /// Relationship kind.
    pub kind: RelationshipKind,
    /// Parent for parent-child edges, lower ID for spouse edges.
    pub from: PersonId,
    /// Child for parent-child edges, higher ID for spouse edges.
    pub to: PersonId,
}

/// Output of rendering a tree from a root person.
///
/// `nodes` only holds persons reachable from the root through parent-child
/// edges. `edges` holds every edge of the tree, so callers that want a
/// strict subgraph must filter it against `nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RenderedTree {
    /// The rendered tree.
    pub tree_id: TreeId,
    /// The person at level 0.
    pub root_person_id: PersonId,
    /// Layout hint supplied by the caller.
    pub view_mode: ViewMode,
    /// Reachable persons with their levels.
    pub nodes: Vec<RenderNode>,
    /// All edges of the tree.
    pub edges: Vec<RenderEdge>,
}
