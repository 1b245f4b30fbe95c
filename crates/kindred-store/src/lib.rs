//! Tree persistence for Kindred.
//!
//! The graph aggregate never touches storage. Services load a
//! [`StoredTree`], rebuild the aggregate from its snapshot, apply one
//! operation, and save the new snapshot with the version they loaded.
//!
//! # Modules
//!
//! - [`repository`] -- The [`TreeRepository`] trait and [`StoredTree`]
//! - [`memory`] -- [`InMemoryTreeRepository`]
//! - [`error`] -- [`StoreError`]

pub mod error;
pub mod memory;
pub mod repository;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use memory::InMemoryTreeRepository;
pub use repository::{StoredTree, TreeRepository};
