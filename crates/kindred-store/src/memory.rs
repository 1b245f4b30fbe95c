//! In-process [`TreeRepository`] backed by a shared map.
//!
//! Useful for tests and single-process deployments. Clones share the same
//! underlying map.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use kindred_types::{TreeId, TreeSnapshot};

use crate::error::StoreError;
use crate::repository::{StoredTree, TreeRepository};

/// Shared in-memory tree store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTreeRepository {
    trees: Arc<RwLock<BTreeMap<TreeId, StoredTree>>>,
}

impl InMemoryTreeRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored trees.
    pub async fn len(&self) -> usize {
        self.trees.read().await.len()
    }

    /// Whether no tree is stored.
    pub async fn is_empty(&self) -> bool {
        self.trees.read().await.is_empty()
    }
}

#[async_trait]
impl TreeRepository for InMemoryTreeRepository {
    async fn load(&self, tree_id: &TreeId) -> Result<Option<StoredTree>, StoreError> {
        Ok(self.trees.read().await.get(tree_id).cloned())
    }

    async fn save(
        &self,
        snapshot: TreeSnapshot,
        expected_version: Option<u64>,
    ) -> Result<u64, StoreError> {
        let mut trees = self.trees.write().await;
        let actual = trees.get(&snapshot.tree_id).map(|stored| stored.version);
        if actual != expected_version {
            return Err(StoreError::VersionConflict {
                tree_id: snapshot.tree_id,
                expected: expected_version,
                actual,
            });
        }

        let version = actual.map_or(1, |v| v.saturating_add(1));
        let tree_id = snapshot.tree_id.clone();
        debug!(tree_id = %tree_id, version, "Tree saved");
        trees.insert(
            tree_id.clone(),
            StoredTree {
                tree_id,
                version,
                updated_at: Utc::now(),
                snapshot,
            },
        );
        Ok(version)
    }

    async fn delete(&self, tree_id: &TreeId) -> Result<bool, StoreError> {
        let removed = self.trees.write().await.remove(tree_id).is_some();
        if removed {
            debug!(tree_id = %tree_id, "Tree deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(name: &str) -> TreeSnapshot {
        TreeSnapshot::empty(TreeId::new(name).unwrap())
    }

    #[tokio::test]
    async fn create_then_update_bumps_version() {
        let repo = InMemoryTreeRepository::new();
        assert_eq!(repo.save(snapshot("t"), None).await.unwrap(), 1);
        assert_eq!(repo.save(snapshot("t"), Some(1)).await.unwrap(), 2);

        let stored = repo.load(&TreeId::new("t").unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn stale_version_is_a_conflict() {
        let repo = InMemoryTreeRepository::new();
        repo.save(snapshot("t"), None).await.unwrap();
        repo.save(snapshot("t"), Some(1)).await.unwrap();

        let err = repo.save(snapshot("t"), Some(1)).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::VersionConflict {
                tree_id: TreeId::new("t").unwrap(),
                expected: Some(1),
                actual: Some(2),
            }
        );
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn create_over_existing_is_a_conflict() {
        let repo = InMemoryTreeRepository::new();
        repo.save(snapshot("t"), None).await.unwrap();
        let err = repo.save(snapshot("t"), None).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn update_of_missing_tree_is_a_conflict() {
        let repo = InMemoryTreeRepository::new();
        let err = repo.save(snapshot("t"), Some(3)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::VersionConflict { actual: None, .. }
        ));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let repo = InMemoryTreeRepository::new();
        let other = repo.clone();
        repo.save(snapshot("t"), None).await.unwrap();
        assert!(other.delete(&TreeId::new("t").unwrap()).await.unwrap());
        assert!(!repo.delete(&TreeId::new("t").unwrap()).await.unwrap());
        assert!(repo.load(&TreeId::new("t").unwrap()).await.unwrap().is_none());
    }
}
