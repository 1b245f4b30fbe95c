//! Generation-level layout for the tree viewer.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use kindred_types::{PersonId, RenderNode, RenderedTree, ViewMode};

use crate::error::GenealogyError;
use crate::graph::GenealogyGraph;

impl GenealogyGraph {
    /// Place every person connected to `root` at a generation level.
    ///
    /// A single breadth-first pass follows parent-child edges both ways:
    /// stepping to a child adds one level, stepping to a parent subtracts
    /// one. The first level assigned to a person wins. Nodes come out in
    /// visit order, root first.
    ///
    /// The edge list is NOT filtered: it carries every parent-child and
    /// spouse edge in the tree, including edges between persons who were
    /// not reached. `view_mode` is copied into the result untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] if `root` is not in the tree.
    pub fn render_tree(
        &self,
        root: &PersonId,
        view_mode: ViewMode,
    ) -> Result<RenderedTree, GenealogyError> {
        self.get_person(root)?;

        let mut levels: BTreeMap<&PersonId, i32> = BTreeMap::new();
        let mut order: Vec<&PersonId> = Vec::new();
        let mut queue: VecDeque<(&PersonId, i32)> = VecDeque::new();

        levels.insert(root, 0);
        order.push(root);
        queue.push_back((root, 0));

        while let Some((current, level)) = queue.pop_front() {
            let below = self
                .child_ids(current)
                .into_iter()
                .map(|child| (child, level.saturating_add(1)));
            let above = self
                .parent_ids(current)
                .into_iter()
                .map(|parent| (parent, level.saturating_sub(1)));

            for (next, next_level) in below.chain(above) {
                if !levels.contains_key(next) {
                    levels.insert(next, next_level);
                    order.push(next);
                    queue.push_back((next, next_level));
                }
            }
        }

        let nodes: Vec<RenderNode> = order
            .into_iter()
            .filter_map(|id| {
                let person = self.person_entry(id)?;
                let level = levels.get(id).copied()?;
                Some(RenderNode {
                    person: person.to_record(),
                    level,
                })
            })
            .collect();

        let edges = self
            .parent_child_edges()
            .iter()
            .map(crate::edge::ParentChildEdge::to_render_edge)
            .chain(self.spouse_edges().map(crate::edge::SpouseEdge::to_render_edge))
            .collect();

        debug!(
            tree_id = %self.tree_id(),
            root = %root,
            node_count = nodes.len(),
            "Tree rendered"
        );

        Ok(RenderedTree {
            tree_id: self.tree_id().clone(),
            root_person_id: root.clone(),
            view_mode,
            nodes,
            edges,
        })
    }
}
