//! Reachability queries over parent-child edges.
//!
//! Searches are breadth-first with an explicit visited set that starts out
//! containing the origin. They therefore terminate, and never report the
//! origin, even if the edge set somehow contained a cycle.

use std::collections::{BTreeSet, VecDeque};

use kindred_types::PersonId;

use crate::error::GenealogyError;
use crate::graph::GenealogyGraph;

/// Which way to follow parent-child edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Towards parents.
    Up,
    /// Towards children.
    Down,
}

impl GenealogyGraph {
    /// All ancestors of a person, nearest generation first.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID.
    pub fn get_ancestors(&self, person_id: &PersonId) -> Result<Vec<PersonId>, GenealogyError> {
        self.get_person(person_id)?;
        Ok(self
            .reachable(person_id, Direction::Up)
            .into_iter()
            .cloned()
            .collect())
    }

    /// All descendants of a person, nearest generation first.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID.
    pub fn get_descendants(&self, person_id: &PersonId) -> Result<Vec<PersonId>, GenealogyError> {
        self.get_person(person_id)?;
        Ok(self
            .reachable(person_id, Direction::Down)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Direct parents of a person.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID.
    pub fn get_parents(&self, person_id: &PersonId) -> Result<Vec<PersonId>, GenealogyError> {
        self.get_person(person_id)?;
        Ok(self.parent_ids(person_id).into_iter().cloned().collect())
    }

    /// Direct children of a person.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID.
    pub fn get_children(&self, person_id: &PersonId) -> Result<Vec<PersonId>, GenealogyError> {
        self.get_person(person_id)?;
        Ok(self.child_ids(person_id).into_iter().cloned().collect())
    }

    /// Spouses of a person.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID.
    pub fn get_spouses(&self, person_id: &PersonId) -> Result<Vec<PersonId>, GenealogyError> {
        self.get_person(person_id)?;
        Ok(self.spouse_ids(person_id).into_iter().cloned().collect())
    }

    /// Persons sharing at least one parent with `person_id`, excluding them.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::NotFound`] for an unknown ID.
    pub fn get_siblings(&self, person_id: &PersonId) -> Result<Vec<PersonId>, GenealogyError> {
        self.get_person(person_id)?;
        let mut siblings = BTreeSet::new();
        for parent in self.parent_ids(person_id) {
            for child in self.child_ids(parent) {
                if child != person_id {
                    siblings.insert(child);
                }
            }
        }
        Ok(siblings.into_iter().cloned().collect())
    }

    /// Ancestor set used by the cycle check.
    pub(crate) fn ancestors_of(&self, person_id: &PersonId) -> BTreeSet<&PersonId> {
        self.reachable(person_id, Direction::Up).into_iter().collect()
    }

    /// Results borrow only from the graph, never from `start`.
    fn reachable<'a>(&'a self, start: &PersonId, direction: Direction) -> Vec<&'a PersonId> {
        let Some(start) = self.person_key(start) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        let mut visited: BTreeSet<&PersonId> = BTreeSet::new();
        let mut queue: VecDeque<&PersonId> = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let next = match direction {
                Direction::Up => self.parent_ids(current),
                Direction::Down => self.child_ids(current),
            };
            for neighbor in next {
                if visited.insert(neighbor) {
                    found.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        found
    }
}
