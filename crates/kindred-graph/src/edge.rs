//! Edge value types with composite keys.
//!
//! Edges are keyed by the IDs they connect, never by a joined string, so an
//! ID may contain any character without colliding with another edge.

use kindred_types::{ParentChildRecord, PersonId, RelationshipKind, RenderEdge, SpouseRecord};

use crate::error::GenealogyError;

/// Directed edge from a parent to a child.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParentChildEdge {
    parent: PersonId,
    child: PersonId,
}

impl ParentChildEdge {
    /// Build an edge, rejecting self-loops.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::InvariantViolation`] if `parent == child`.
    pub fn new(parent: PersonId, child: PersonId) -> Result<Self, GenealogyError> {
        if parent == child {
            return Err(GenealogyError::InvariantViolation(format!(
                "person {parent} cannot be their own parent"
            )));
        }
        Ok(Self { parent, child })
    }

    /// Build from parts already known to differ (read back from the graph).
    pub(crate) const fn from_parts(parent: PersonId, child: PersonId) -> Self {
        Self { parent, child }
    }

    /// The parent endpoint.
    pub const fn parent(&self) -> &PersonId {
        &self.parent
    }

    /// The child endpoint.
    pub const fn child(&self) -> &PersonId {
        &self.child
    }

    /// Flatten into a storable record.
    pub fn to_record(&self) -> ParentChildRecord {
        ParentChildRecord {
            parent_id: self.parent.clone(),
            child_id: self.child.clone(),
        }
    }

    /// Render payload form.
    pub fn to_render_edge(&self) -> RenderEdge {
        RenderEdge {
            kind: RelationshipKind::ParentChild,
            from: self.parent.clone(),
            to: self.child.clone(),
        }
    }
}

/// Undirected spouse edge stored in canonical order (`first < second`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpouseEdge {
    first: PersonId,
    second: PersonId,
}

impl SpouseEdge {
    /// Build an edge from two IDs in either order.
    ///
    /// # Errors
    ///
    /// Returns [`GenealogyError::InvariantViolation`] if both IDs are equal.
    pub fn new(a: PersonId, b: PersonId) -> Result<Self, GenealogyError> {
        match a.cmp(&b) {
            core::cmp::Ordering::Less => Ok(Self {
                first: a,
                second: b,
            }),
            core::cmp::Ordering::Greater => Ok(Self {
                first: b,
                second: a,
            }),
            core::cmp::Ordering::Equal => Err(GenealogyError::InvariantViolation(format!(
                "person {a} cannot be their own spouse"
            ))),
        }
    }

    /// Lower ID of the pair.
    pub const fn first(&self) -> &PersonId {
        &self.first
    }

    /// Higher ID of the pair.
    pub const fn second(&self) -> &PersonId {
        &self.second
    }

    /// Whether `person` is one of the two endpoints.
    pub fn involves(&self, person: &PersonId) -> bool {
        self.first == *person || self.second == *person
    }

    /// The endpoint opposite `person`, if `person` is on this edge.
    pub fn partner_of(&self, person: &PersonId) -> Option<&PersonId> {
        if self.first == *person {
            Some(&self.second)
        } else if self.second == *person {
            Some(&self.first)
        } else {
            None
        }
    }

    /// Flatten into a storable record.
    pub fn to_record(&self) -> SpouseRecord {
        SpouseRecord {
            person_a: self.first.clone(),
            person_b: self.second.clone(),
        }
    }

    /// Render payload form.
    pub fn to_render_edge(&self) -> RenderEdge {
        RenderEdge {
            kind: RelationshipKind::Spouse,
            from: self.first.clone(),
            to: self.second.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GenealogyErrorKind;

    fn id(s: &str) -> PersonId {
        PersonId::new(s).unwrap()
    }

    #[test]
    fn parent_child_rejects_self_loop() {
        let err = ParentChildEdge::new(id("a"), id("a")).unwrap_err();
        assert_eq!(err.kind(), GenealogyErrorKind::InvariantViolation);
    }

    #[test]
    fn parent_child_keeps_direction() {
        let edge = ParentChildEdge::new(id("z"), id("a")).unwrap();
        assert_eq!(edge.parent(), &id("z"));
        assert_eq!(edge.child(), &id("a"));
    }

    #[test]
    fn spouse_pair_is_canonical_in_either_order() {
        let ab = SpouseEdge::new(id("alice"), id("bob")).unwrap();
        let ba = SpouseEdge::new(id("bob"), id("alice")).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.first(), &id("alice"));
        assert_eq!(ab.second(), &id("bob"));
    }

    #[test]
    fn spouse_rejects_self() {
        assert!(SpouseEdge::new(id("a"), id("a")).is_err());
    }

    #[test]
    fn ids_containing_delimiters_do_not_collide() {
        let left = ParentChildEdge::new(id("a->b"), id("c")).unwrap();
        let right = ParentChildEdge::new(id("a"), id("b->c")).unwrap();
        assert_ne!(left, right);

        let s1 = SpouseEdge::new(id("x~y"), id("z")).unwrap();
        let s2 = SpouseEdge::new(id("x"), id("y~z")).unwrap();
        assert_ne!(s1, s2);
    }

    #[test]
    fn partner_of_returns_other_end() {
        let edge = SpouseEdge::new(id("a"), id("b")).unwrap();
        assert_eq!(edge.partner_of(&id("a")), Some(&id("b")));
        assert_eq!(edge.partner_of(&id("b")), Some(&id("a")));
        assert_eq!(edge.partner_of(&id("c")), None);
        assert!(edge.involves(&id("b")));
    }
}
