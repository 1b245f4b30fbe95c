//! Genealogy graph aggregate for Kindred family trees.
//!
//! This crate is the consistency boundary of a family tree. A
//! [`GenealogyGraph`] owns every person and relationship of one tree, and
//! each public operation either succeeds with all invariants intact or fails
//! with a [`GenealogyError`] and changes nothing. There is no I/O, no async
//! and no interior mutability here: callers load a graph, apply one
//! operation, and hand the resulting [`TreeSnapshot`] to storage.
//!
//! # Modules
//!
//! - [`person`] -- Validated, immutable [`Person`] values and [`PersonUpdate`]
//! - [`edge`] -- [`ParentChildEdge`] and canonical [`SpouseEdge`] keys
//! - [`graph`] -- The [`GenealogyGraph`] aggregate and its mutations
//! - [`traversal`] -- Ancestor, descendant, and neighbour queries
//! - [`render`] -- Generation-level layout for the tree viewer
//! - [`snapshot`] -- Flattening and validated replay
//! - [`error`] -- [`GenealogyError`] and [`GenealogyErrorKind`]
//!
//! # Usage
//!
//! ```
//! use kindred_graph::{GenealogyErrorKind, GenealogyGraph};
//! use kindred_types::{PersonId, PersonRecord, TreeId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = GenealogyGraph::new(TreeId::new("smiths")?);
//! let anna = PersonId::new("anna")?;
//! let ben = PersonId::new("ben")?;
//! graph.add_person(PersonRecord::named(anna.clone(), "Anna"))?;
//! graph.add_person(PersonRecord::named(ben.clone(), "Ben"))?;
//!
//! graph.add_parent_child_relationship(&anna, &ben)?;
//! let err = graph.add_parent_child_relationship(&ben, &anna);
//! assert_eq!(err.map_err(|e| e.kind()), Err(GenealogyErrorKind::CycleDetected));
//! # Ok(())
//! # }
//! ```
//!
//! [`TreeSnapshot`]: kindred_types::TreeSnapshot

pub mod edge;
pub mod error;
pub mod graph;
pub mod person;
pub mod render;
pub mod snapshot;
pub mod traversal;

// Re-export primary types at crate root.
pub use edge::{ParentChildEdge, SpouseEdge};
pub use error::{GenealogyError, GenealogyErrorKind};
pub use graph::{GenealogyGraph, MAX_PARENTS};
pub use person::{MAX_NAME_CHARS, Person, PersonUpdate};
