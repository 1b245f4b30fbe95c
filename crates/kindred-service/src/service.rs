//! Command and query handlers for family trees.
//!
//! Every command runs the same cycle: load the latest stored tree, rebuild
//! the aggregate by replay, apply exactly one operation, and save with the
//! version that was loaded. A version conflict means another writer got
//! there first, so the whole cycle runs again on fresh state, up to
//! [`ServiceConfig::max_save_attempts`] times. Domain errors are returned
//! at once and never retried.

use tracing::{debug, warn};

use kindred_graph::{GenealogyGraph, Person, PersonUpdate};
use kindred_store::TreeRepository;
use kindred_types::{
    PersonId, PersonRecord, RelationshipKind, RenderedTree, TreeId, TreeSnapshot, ViewMode,
};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::import::{ImportReport, ImportRow, apply_rows};

/// Family tree operations over a [`TreeRepository`].
#[derive(Debug, Clone)]
pub struct TreeService<R> {
    repository: R,
    config: ServiceConfig,
}

impl<R: TreeRepository> TreeService<R> {
    /// Create a service over a repository.
    pub const fn new(repository: R, config: ServiceConfig) -> Self {
        Self { repository, config }
    }

    /// The underlying repository.
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Create an empty tree and return its first version.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::TreeAlreadyExists`] if the ID is taken.
    pub async fn create_tree(&self, tree_id: TreeId) -> Result<u64, ServiceError> {
        match self
            .repository
            .save(TreeSnapshot::empty(tree_id.clone()), None)
            .await
        {
            Ok(version) => {
                debug!(tree_id = %tree_id, "Tree created");
                Ok(version)
            }
            Err(err) if err.is_conflict() => Err(ServiceError::TreeAlreadyExists(tree_id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Add a person and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if the aggregate rejects the person,
    /// plus the errors common to every command.
    pub async fn add_person(
        &self,
        tree_id: &TreeId,
        record: PersonRecord,
    ) -> Result<PersonRecord, ServiceError> {
        self.mutate(tree_id, |graph| {
            Ok(graph.add_person(record.clone()).map(Person::to_record)?)
        })
        .await
    }

    /// Replace a person's fields and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if the update is rejected.
    pub async fn update_person(
        &self,
        tree_id: &TreeId,
        person_id: &PersonId,
        update: PersonUpdate,
    ) -> Result<PersonRecord, ServiceError> {
        self.mutate(tree_id, |graph| {
            Ok(graph
                .update_person(person_id, update.clone())
                .map(Person::to_record)?)
        })
        .await
    }

    /// Remove a person with no remaining relationships.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if the person is unknown or still
    /// linked.
    pub async fn remove_person(
        &self,
        tree_id: &TreeId,
        person_id: &PersonId,
    ) -> Result<PersonRecord, ServiceError> {
        self.mutate(tree_id, |graph| {
            Ok(graph.remove_person(person_id).map(|p| p.to_record())?)
        })
        .await
    }

    /// Link a parent to a child.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if the link breaks a tree invariant.
    pub async fn add_parent_child_relationship(
        &self,
        tree_id: &TreeId,
        parent_id: &PersonId,
        child_id: &PersonId,
    ) -> Result<(), ServiceError> {
        self.mutate(tree_id, |graph| {
            Ok(graph.add_parent_child_relationship(parent_id, child_id)?)
        })
        .await
    }

    /// Link two spouses.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if the link breaks a tree invariant.
    pub async fn add_spouse_relationship(
        &self,
        tree_id: &TreeId,
        a: &PersonId,
        b: &PersonId,
    ) -> Result<(), ServiceError> {
        self.mutate(tree_id, |graph| Ok(graph.add_spouse_relationship(a, b)?))
            .await
    }

    /// Remove the relationship between two persons and return its kind.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] if no relationship links them.
    pub async fn remove_relationship(
        &self,
        tree_id: &TreeId,
        first: &PersonId,
        second: &PersonId,
    ) -> Result<RelationshipKind, ServiceError> {
        self.mutate(tree_id, |graph| {
            Ok(graph.remove_relationship(first, second)?)
        })
        .await
    }

    /// Apply a batch of rows and save once.
    ///
    /// Rejected rows are reported, not fatal. Nothing is saved when no row
    /// was applied.
    ///
    /// # Errors
    ///
    /// Only the errors common to every command; row failures are in the
    /// returned report.
    pub async fn import_batch(
        &self,
        tree_id: &TreeId,
        rows: &[ImportRow],
    ) -> Result<ImportReport, ServiceError> {
        let report = self
            .mutate_if(tree_id, |graph| {
                let report = apply_rows(graph, rows);
                let changed = report.applied > 0;
                Ok((report, changed))
            })
            .await?;
        debug!(
            tree_id = %tree_id,
            applied = report.applied,
            failed = report.failures.len(),
            "Import finished"
        );
        Ok(report)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Look up a person.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] for an unknown person.
    pub async fn get_person(
        &self,
        tree_id: &TreeId,
        person_id: &PersonId,
    ) -> Result<PersonRecord, ServiceError> {
        let graph = self.load_graph(tree_id).await?.1;
        Ok(graph.get_person(person_id)?.to_record())
    }

    /// All ancestors of a person, nearest generation first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] for an unknown person.
    pub async fn get_ancestors(
        &self,
        tree_id: &TreeId,
        person_id: &PersonId,
    ) -> Result<Vec<PersonId>, ServiceError> {
        let graph = self.load_graph(tree_id).await?.1;
        Ok(graph.get_ancestors(person_id)?)
    }

    /// All descendants of a person, nearest generation first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] for an unknown person.
    pub async fn get_descendants(
        &self,
        tree_id: &TreeId,
        person_id: &PersonId,
    ) -> Result<Vec<PersonId>, ServiceError> {
        let graph = self.load_graph(tree_id).await?.1;
        Ok(graph.get_descendants(person_id)?)
    }

    /// Lay out the tree around `root`. Without a view mode the configured
    /// default is used.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] for an unknown root.
    pub async fn render_tree(
        &self,
        tree_id: &TreeId,
        root: &PersonId,
        view_mode: Option<ViewMode>,
    ) -> Result<RenderedTree, ServiceError> {
        let graph = self.load_graph(tree_id).await?.1;
        let mode = view_mode.unwrap_or(self.config.default_view_mode);
        Ok(graph.render_tree(root, mode)?)
    }

    // =========================================================================
    // Load-modify-save
    // =========================================================================

    async fn load_graph(&self, tree_id: &TreeId) -> Result<(u64, GenealogyGraph), ServiceError> {
        let stored = self
            .repository
            .load(tree_id)
            .await?
            .ok_or_else(|| ServiceError::TreeNotFound(tree_id.clone()))?;
        let graph = GenealogyGraph::from_snapshot(stored.snapshot).inspect_err(|err| {
            warn!(
                tree_id = %tree_id,
                version = stored.version,
                error = %err,
                "Stored tree failed replay"
            );
        })?;
        Ok((stored.version, graph))
    }

    async fn mutate<T, F>(&self, tree_id: &TreeId, mut apply: F) -> Result<T, ServiceError>
    where
        F: FnMut(&mut GenealogyGraph) -> Result<T, ServiceError>,
    {
        self.mutate_if(tree_id, |graph| apply(graph).map(|out| (out, true)))
            .await
    }

    /// Run `apply` on fresh state and save when it reports a change,
    /// retrying the whole cycle on version conflicts.
    async fn mutate_if<T, F>(&self, tree_id: &TreeId, mut apply: F) -> Result<T, ServiceError>
    where
        F: FnMut(&mut GenealogyGraph) -> Result<(T, bool), ServiceError>,
    {
        let attempts = self.config.attempts();
        for attempt in 1..=attempts {
            let (version, mut graph) = self.load_graph(tree_id).await?;
            let (output, changed) = apply(&mut graph)?;
            if !changed {
                return Ok(output);
            }

            match self.repository.save(graph.to_snapshot(), Some(version)).await {
                Ok(new_version) => {
                    debug!(tree_id = %tree_id, version = new_version, attempt, "Tree updated");
                    return Ok(output);
                }
                Err(err) if err.is_conflict() => {
                    warn!(
                        tree_id = %tree_id,
                        attempt,
                        attempts,
                        "Version conflict, reloading tree"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(ServiceError::ConcurrentModification {
            tree_id: tree_id.clone(),
            attempts,
        })
    }
}

