//! Flattening to and rebuilding from [`TreeSnapshot`].
//!
//! Rebuilding never trusts stored data: every record is replayed through the
//! same validated operations used for live edits, so a snapshot that breaks
//! an invariant is rejected instead of loaded.

use tracing::debug;

use kindred_types::TreeSnapshot;

use crate::error::GenealogyError;
use crate::graph::GenealogyGraph;

impl GenealogyGraph {
    /// Flatten the tree for persistence.
    ///
    /// Persons and edges come out sorted, so two graphs with the same
    /// contents produce equal snapshots.
    pub fn to_snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            tree_id: self.tree_id().clone(),
            persons: self.persons().map(crate::person::Person::to_record).collect(),
            parent_child: self
                .parent_child_edges()
                .iter()
                .map(crate::edge::ParentChildEdge::to_record)
                .collect(),
            spouses: self
                .spouse_edges()
                .map(crate::edge::SpouseEdge::to_record)
                .collect(),
        }
    }

    /// Rebuild a tree by replaying a snapshot: persons first, then
    /// parent-child edges, then spouse edges.
    ///
    /// # Errors
    ///
    /// Returns the error of the first record that fails validation.
    pub fn from_snapshot(snapshot: TreeSnapshot) -> Result<Self, GenealogyError> {
        let TreeSnapshot {
            tree_id,
            persons,
            parent_child,
            spouses,
        } = snapshot;
        let mut graph = Self::new(tree_id);

        for record in persons {
            graph.add_person(record).inspect_err(|err| {
                debug!(error = %err, "Stored person rejected during replay");
            })?;
        }
        for edge in &parent_child {
            graph
                .add_parent_child_relationship(&edge.parent_id, &edge.child_id)
                .inspect_err(|err| {
                    debug!(error = %err, "Stored parent-child edge rejected during replay");
                })?;
        }
        for edge in &spouses {
            graph
                .add_spouse_relationship(&edge.person_a, &edge.person_b)
                .inspect_err(|err| {
                    debug!(error = %err, "Stored spouse edge rejected during replay");
                })?;
        }

        Ok(graph)
    }
}
