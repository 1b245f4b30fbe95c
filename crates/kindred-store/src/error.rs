//! Error types for tree persistence.

use kindred_types::TreeId;

/// Errors that can occur while loading or saving trees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The stored version did not match the version the caller loaded.
    ///
    /// `None` on either side means "no stored tree".
    #[error("version conflict on tree {tree_id}: expected {expected:?}, found {actual:?}")]
    VersionConflict {
        /// Tree being saved.
        tree_id: TreeId,
        /// Version the caller expected to overwrite.
        expected: Option<u64>,
        /// Version currently stored.
        actual: Option<u64>,
    },

    /// The backing store failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether retrying the whole load-modify-save cycle may succeed.
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}
