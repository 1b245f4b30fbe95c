//! Shared type definitions for Kindred family trees.
//!
//! This crate holds the serializable vocabulary used across the workspace:
//! identifiers, enumerations, and the flattened records exchanged with
//! storage, importers, and the frontend. Types flow to `TypeScript` via
//! `ts-rs` for the tree viewer.
//!
//! # Modules
//!
//! - [`ids`] -- Validated string identifiers for persons and trees
//! - [`enums`] -- Gender, relationship kind, and render view mode
//! - [`structs`] -- Person/edge records, tree snapshots, render payloads
//! - [`error`] -- Parse errors for raw input

pub mod enums;
pub mod error;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Gender, RelationshipKind, ViewMode};
pub use error::ParseError;
pub use ids::{PersonId, TreeId};
pub use structs::{
    ParentChildRecord, PersonRecord, RenderEdge, RenderNode, RenderedTree, SpouseRecord,
    TreeSnapshot,
};
