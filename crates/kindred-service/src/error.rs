//! Error types for the tree service.

use kindred_graph::GenealogyError;
use kindred_store::StoreError;
use kindred_types::TreeId;

/// Errors returned by [`TreeService`](crate::TreeService) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The aggregate rejected the operation, or a stored tree failed replay.
    #[error(transparent)]
    Domain(#[from] GenealogyError),

    /// The repository failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No tree is stored under this ID.
    #[error("tree not found: {0}")]
    TreeNotFound(TreeId),

    /// A tree with this ID already exists.
    #[error("tree already exists: {0}")]
    TreeAlreadyExists(TreeId),

    /// Every attempt lost a race with another writer.
    #[error("tree {tree_id} was modified concurrently; gave up after {attempts} attempts")]
    ConcurrentModification {
        /// Contended tree.
        tree_id: TreeId,
        /// Number of load-modify-save cycles attempted.
        attempts: u32,
    },
}

impl ServiceError {
    /// The domain error, if the aggregate rejected the operation.
    pub const fn as_domain(&self) -> Option<&GenealogyError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}
