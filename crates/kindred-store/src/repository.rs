//! The [`TreeRepository`] trait and the stored tree envelope.
//!
//! A repository stores whole [`TreeSnapshot`]s under a monotonically
//! increasing version. Writers pass the version they loaded; if another
//! writer got there first the save fails with
//! [`StoreError::VersionConflict`] and nothing is written.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kindred_types::{TreeId, TreeSnapshot};

use crate::error::StoreError;

/// A persisted tree together with its concurrency metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTree {
    /// Identifier of the tree.
    pub tree_id: TreeId,
    /// Version of this write. The first save is version 1.
    pub version: u64,
    /// When this version was written.
    pub updated_at: DateTime<Utc>,
    /// Flattened tree contents.
    pub snapshot: TreeSnapshot,
}

/// Persistence for family trees with optimistic concurrency.
#[async_trait]
pub trait TreeRepository: Send + Sync {
    /// Load the latest version of a tree, or `None` if it was never saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the store cannot be read.
    async fn load(&self, tree_id: &TreeId) -> Result<Option<StoredTree>, StoreError>;

    /// Save a snapshot and return its new version.
    ///
    /// `expected_version` is `None` to create a tree that must not exist
    /// yet, or the version previously loaded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::VersionConflict`] if the stored version differs
    /// from `expected_version`.
    async fn save(
        &self,
        snapshot: TreeSnapshot,
        expected_version: Option<u64>,
    ) -> Result<u64, StoreError>;

    /// Delete a tree. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the store cannot be written.
    async fn delete(&self, tree_id: &TreeId) -> Result<bool, StoreError>;
}
