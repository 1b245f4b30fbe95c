//! The [`GenealogyGraph`] aggregate: one family tree and its invariants.
//!
//! The graph owns every person and edge of a tree. Parent-child edges are
//! held in two ID-keyed indexes (child to parents, parent to children) that
//! always describe the same edge set; spouse edges live in a set of
//! canonical pairs. Nothing is cached beyond these indexes: reachability is
//! recomputed on demand.
//!
//! After every successful call:
//! 1. Every edge endpoint is a person in the tree.
//! 2. No edge connects a person to themselves.
//! 3. No edge is recorded twice.
//! 4. No person has more than [`MAX_PARENTS`] parents.
//! 5. Parent-child edges form no directed cycle.
//! 6. A parent with a known birth date is born strictly before a child with a
//!    known birth date.
//! 7. A person is only removed once no edge references them.
//!
//! A failed call returns before any state is touched.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use kindred_types::{PersonId, PersonRecord, RelationshipKind, TreeId};

use crate::edge::{ParentChildEdge, SpouseEdge};
use crate::error::GenealogyError;
use crate::person::{Person, PersonUpdate};

/// Maximum number of parents a person can have.
pub const MAX_PARENTS: usize = 2;

/// One family tree with all of its persons and relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenealogyGraph {
    /// Identifier of this tree.
    tree_id: TreeId,
    /// All persons indexed by ID.
    persons: BTreeMap<PersonId, Person>,
    /// Child -> parents. Entries are removed when they become empty.
    child_to_parents: BTreeMap<PersonId, BTreeSet<PersonId>>,
    /// Parent -> children. Mirror of `child_to_parents`.
    parent_to_children: BTreeMap<PersonId, BTreeSet<PersonId>>,
    /// Canonical spouse pairs.
    spouses: BTreeSet<SpouseEdge>,
}

impl GenealogyGraph {
    /// Create an empty tree.
    pub const fn new(tree_id: TreeId) -> Self {
        Self {
            tree_id,
            persons: BTreeMap::new(),
            child_to_parents: BTreeMap::new(),
            parent_to_children: BTreeMap::new(),
            spouses: BTreeSet::new(),
        }
    }

    // -------------------------------------------------------------------
    // Person operations
    // -------------------------------------------------------------------

    /// Validate and add a person.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::DuplicatePerson`] if the ID is taken, or
    /// [`GenealogyError::InvariantViolation`] if the record is invalid.
    pub fn add_person(&mut self, record: PersonRecord) -> Result<&Person, GenealogyError> {
        if self.persons.contains_key(&record.person_id) {
            return Err(GenealogyError::DuplicatePerson(record.person_id));
        }
        let person = Person::new(record)?;
        let id = person.id().clone();
        debug!(tree_id = %self.tree_id, person_id = %id, "Person added");
        Ok(self.persons.entry(id).or_insert(person))
    }

    /// Replace a person's fields, keeping their ID and relationships.
    ///
    /// When the birth date changes, every parent-child edge touching the
    /// person is checked again for chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID,
    /// [`GenealogyError::InvariantViolation`] for invalid fields, or
    /// [`GenealogyError::AgeInconsistency`] if an existing edge would no
    /// longer be in chronological order.
    pub fn update_person(
        &mut self,
        person_id: &PersonId,
        update: PersonUpdate,
    ) -> Result<&Person, GenealogyError> {
        let current = self
            .persons
            .get(person_id)
            .ok_or_else(|| GenealogyError::person_not_found(person_id))?;
        let birth_changed = update.changes_birth_date();
        let updated = current.with_update(update)?;

        if birth_changed {
            for parent_id in self.parent_ids(person_id) {
                if let Some(parent) = self.persons.get(parent_id) {
                    check_birth_order(parent, &updated)?;
                }
            }
            for child_id in self.child_ids(person_id) {
                if let Some(child) = self.persons.get(child_id) {
                    check_birth_order(&updated, child)?;
                }
            }
        }

        debug!(tree_id = %self.tree_id, person_id = %person_id, "Person updated");
        self.persons.insert(person_id.clone(), updated);
        self.get_person(person_id)
    }

    /// Remove a person that has no relationships left.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID, or
    /// [`GenealogyError::PersonHasRelationships`] if any edge still
    /// references the person.
    pub fn remove_person(&mut self, person_id: &PersonId) -> Result<Person, GenealogyError> {
        if !self.persons.contains_key(person_id) {
            return Err(GenealogyError::person_not_found(person_id));
        }

        let count = self.incident_edge_count(person_id);
        if count > 0 {
            return Err(GenealogyError::PersonHasRelationships {
                person: person_id.clone(),
                count,
            });
        }

        let removed = self
            .persons
            .remove(person_id)
            .ok_or_else(|| GenealogyError::person_not_found(person_id))?;
        debug!(tree_id = %self.tree_id, person_id = %person_id, "Person removed");
        Ok(removed)
    }

    /// Look up a person.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID.
    pub fn get_person(&self, person_id: &PersonId) -> Result<&Person, GenealogyError> {
        self.persons
            .get(person_id)
            .ok_or_else(|| GenealogyError::person_not_found(person_id))
    }

    /// Whether a person with this ID is in the tree.
    pub fn contains_person(&self, person_id: &PersonId) -> bool {
        self.persons.contains_key(person_id)
    }

    // -------------------------------------------------------------------
    // Relationship operations
    // -------------------------------------------------------------------

    /// Record that `parent_id` is a parent of `child_id`.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// existence, self-link, duplicate, parent limit, birth order, cycle.
    ///
    /// # Errors
    ///
    /// [`GenealogyError::NotFound`], [`GenealogyError::InvariantViolation`],
    /// [`GenealogyError::DuplicateRelationship`],
    /// [`GenealogyError::ParentLimitExceeded`],
    /// [`GenealogyError::AgeInconsistency`], or
    /// [`GenealogyError::CycleDetected`], in that order of precedence.
    pub fn add_parent_child_relationship(
        &mut self,
        parent_id: &PersonId,
        child_id: &PersonId,
    ) -> Result<(), GenealogyError> {
        let parent = self.get_person(parent_id)?;
        let child = self.get_person(child_id)?;

        let edge = ParentChildEdge::new(parent_id.clone(), child_id.clone())?;

        let parents = self.parent_ids(child_id);
        if parents.contains(parent_id) {
            return Err(GenealogyError::DuplicateRelationship {
                kind: RelationshipKind::ParentChild,
                first: parent_id.clone(),
                second: child_id.clone(),
            });
        }
        if parents.len() >= MAX_PARENTS {
            return Err(GenealogyError::ParentLimitExceeded {
                child: child_id.clone(),
                limit: MAX_PARENTS,
            });
        }

        check_birth_order(parent, child)?;

        if self.ancestors_of(parent_id).contains(child_id) {
            return Err(GenealogyError::CycleDetected {
                parent: parent_id.clone(),
                child: child_id.clone(),
            });
        }

        let (parent_id, child_id) = (edge.parent().clone(), edge.child().clone());
        self.child_to_parents
            .entry(child_id.clone())
            .or_default()
            .insert(parent_id.clone());
        self.parent_to_children
            .entry(parent_id.clone())
            .or_default()
            .insert(child_id.clone());

        debug!(
            tree_id = %self.tree_id,
            parent_id = %parent_id,
            child_id = %child_id,
            "Parent-child relationship added"
        );
        Ok(())
    }

    /// Record that two persons are spouses. Argument order does not matter.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] if either person is unknown,
    /// [`GenealogyError::InvariantViolation`] if both IDs are the same, or
    /// [`GenealogyError::DuplicateRelationship`] if the pair already exists.
    pub fn add_spouse_relationship(
        &mut self,
        a: &PersonId,
        b: &PersonId,
    ) -> Result<(), GenealogyError> {
        self.get_person(a)?;
        self.get_person(b)?;

        let edge = SpouseEdge::new(a.clone(), b.clone())?;
        if self.spouses.contains(&edge) {
            return Err(GenealogyError::DuplicateRelationship {
                kind: RelationshipKind::Spouse,
                first: edge.first().clone(),
                second: edge.second().clone(),
            });
        }

        debug!(
            tree_id = %self.tree_id,
            person_a = %edge.first(),
            person_b = %edge.second(),
            "Spouse relationship added"
        );
        self.spouses.insert(edge);
        Ok(())
    }

    /// Remove the first relationship found between two persons.
    ///
    /// Looks for a parent-child edge `first -> second`, then
    /// `second -> first`, then a spouse edge. Returns the kind removed.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] if no such relationship exists.
    pub fn remove_relationship(
        &mut self,
        first: &PersonId,
        second: &PersonId,
    ) -> Result<RelationshipKind, GenealogyError> {
        if self.unlink_parent_child(first, second) || self.unlink_parent_child(second, first) {
            debug!(
                tree_id = %self.tree_id,
                first = %first,
                second = %second,
                "Parent-child relationship removed"
            );
            return Ok(RelationshipKind::ParentChild);
        }

        if let Ok(edge) = SpouseEdge::new(first.clone(), second.clone())
            && self.spouses.remove(&edge)
        {
            debug!(
                tree_id = %self.tree_id,
                first = %first,
                second = %second,
                "Spouse relationship removed"
            );
            return Ok(RelationshipKind::Spouse);
        }

        Err(GenealogyError::relationship_not_found(first, second))
    }

    // -------------------------------------------------------------------
    // Read-only accessors
    // -------------------------------------------------------------------

    /// Identifier of this tree.
    pub const fn tree_id(&self) -> &TreeId {
        &self.tree_id
    }

    /// Number of persons in the tree.
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Iterate over all persons in ID order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    /// All parent-child edges, ordered by parent then child.
    pub fn parent_child_edges(&self) -> Vec<ParentChildEdge> {
        self.parent_to_children
            .iter()
            .flat_map(|(parent, children)| {
                children
                    .iter()
                    .map(|child| ParentChildEdge::from_parts(parent.clone(), child.clone()))
            })
            .collect()
    }

    /// All spouse edges in canonical order.
    pub fn spouse_edges(&self) -> impl Iterator<Item = &SpouseEdge> {
        self.spouses.iter()
    }

    // -------------------------------------------------------------------
    // Crate-internal index access
    // -------------------------------------------------------------------

    /// Direct parents of a person (empty for unknown IDs).
    pub(crate) fn parent_ids(&self, person_id: &PersonId) -> BTreeSet<&PersonId> {
        self.child_to_parents
            .get(person_id)
            .map(|parents| parents.iter().collect())
            .unwrap_or_default()
    }

    /// Direct children of a person (empty for unknown IDs).
    pub(crate) fn child_ids(&self, person_id: &PersonId) -> BTreeSet<&PersonId> {
        self.parent_to_children
            .get(person_id)
            .map(|children| children.iter().collect())
            .unwrap_or_default()
    }

    /// Spouses of a person (empty for unknown IDs).
    pub(crate) fn spouse_ids(&self, person_id: &PersonId) -> BTreeSet<&PersonId> {
        self.spouses
            .iter()
            .filter_map(|edge| edge.partner_of(person_id))
            .collect()
    }

    /// The graph-owned copy of an ID, if the person exists.
    pub(crate) fn person_key(&self, person_id: &PersonId) -> Option<&PersonId> {
        self.persons.get_key_value(person_id).map(|(key, _)| key)
    }

    pub(crate) fn person_entry(&self, person_id: &PersonId) -> Option<&Person> {
        self.persons.get(person_id)
    }

    fn incident_edge_count(&self, person_id: &PersonId) -> usize {
        self.parent_ids(person_id)
            .len()
            .saturating_add(self.child_ids(person_id).len())
            .saturating_add(self.spouse_ids(person_id).len())
    }

    /// Remove `parent -> child` from both indexes. Returns whether it existed.
    fn unlink_parent_child(&mut self, parent: &PersonId, child: &PersonId) -> bool {
        let removed = self
            .child_to_parents
            .get_mut(child)
            .is_some_and(|parents| parents.remove(parent));
        if !removed {
            return false;
        }

        if self.child_to_parents.get(child).is_some_and(BTreeSet::is_empty) {
            self.child_to_parents.remove(child);
        }
        if let Some(children) = self.parent_to_children.get_mut(parent) {
            children.remove(child);
            if children.is_empty() {
                self.parent_to_children.remove(parent);
            }
        }
        true
    }
}

/// Fail unless `parent` is born strictly before `child` (when both are known).
fn check_birth_order(parent: &Person, child: &Person) -> Result<(), GenealogyError> {
    if let (Some(parent_birth), Some(child_birth)) = (parent.birth_date(), child.birth_date())
        && parent_birth >= child_birth
    {
        return Err(GenealogyError::AgeInconsistency {
            parent: parent.id().clone(),
            parent_birth,
            child: child.id().clone(),
            child_birth,
        });
    }
    Ok(())
}
