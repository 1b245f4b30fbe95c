//! Error types for the `kindred-graph` crate.
//!
//! Every aggregate operation fails with a [`GenealogyError`] before touching
//! any state, so an error always means "nothing changed". Callers dispatch on
//! [`GenealogyError::kind`] rather than on message text.

use chrono::NaiveDate;

use kindred_types::{ParseError, PersonId, RelationshipKind};

/// Errors raised by person validation and graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenealogyError {
    /// A referenced person or relationship does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// What was looked up ("person" or "relationship").
        entity: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// A field or shape rule was broken (empty name, self-relationship, ...).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A person with this ID is already in the tree.
    #[error("invariant violation: person already exists: {0}")]
    DuplicatePerson(PersonId),

    /// The exact relationship is already recorded.
    #[error("{kind} relationship already exists between {first} and {second}")]
    DuplicateRelationship {
        /// Kind of the duplicated relationship.
        kind: RelationshipKind,
        /// Parent, or lower spouse ID.
        first: PersonId,
        /// Child, or higher spouse ID.
        second: PersonId,
    },

    /// The child already has the maximum number of parents.
    #[error("person {child} already has {limit} parents")]
    ParentLimitExceeded {
        /// The child that is full.
        child: PersonId,
        /// The parent limit.
        limit: usize,
    },

    /// The edge would close a loop in the parent-child relation.
    #[error("making {parent} a parent of {child} would create a cycle")]
    CycleDetected {
        /// Proposed parent.
        parent: PersonId,
        /// Proposed child, already an ancestor of `parent`.
        child: PersonId,
    },

    /// A parent would not be born strictly before the child.
    #[error("parent {parent} (born {parent_birth}) must be born before child {child} (born {child_birth})")]
    AgeInconsistency {
        /// The parent.
        parent: PersonId,
        /// Parent's birth date.
        parent_birth: NaiveDate,
        /// The child.
        child: PersonId,
        /// Child's birth date.
        child_birth: NaiveDate,
    },

    /// A relationship description could not be interpreted.
    #[error("invalid relationship shape: {0}")]
    InvalidRelationshipShape(String),

    /// The person still has edges and cannot be removed.
    #[error("person {person} still has {count} relationship(s)")]
    PersonHasRelationships {
        /// The person that was to be removed.
        person: PersonId,
        /// Number of incident edges.
        count: usize,
    },
}

/// Fieldless classification of [`GenealogyError`] for dispatch.
///
/// Specialised kinds such as `DuplicatePerson` are not reported as
/// `InvariantViolation`; use [`GenealogyError::is_invariant_violation`] to
/// match the whole family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenealogyErrorKind {
    /// See [`GenealogyError::NotFound`].
    NotFound,
    /// See [`GenealogyError::InvariantViolation`].
    InvariantViolation,
    /// See [`GenealogyError::DuplicatePerson`].
    DuplicatePerson,
    /// See [`GenealogyError::DuplicateRelationship`].
    DuplicateRelationship,
    /// See [`GenealogyError::ParentLimitExceeded`].
    ParentLimitExceeded,
    /// See [`GenealogyError::CycleDetected`].
    CycleDetected,
    /// See [`GenealogyError::AgeInconsistency`].
    AgeInconsistency,
    /// See [`GenealogyError::InvalidRelationshipShape`].
    InvalidRelationshipShape,
    /// See [`GenealogyError::PersonHasRelationships`].
    PersonHasRelationships,
}

impl GenealogyError {
    /// Shorthand for a missing person.
    pub fn person_not_found(id: &PersonId) -> Self {
        Self::NotFound {
            entity: "person",
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing relationship between two persons.
    pub fn relationship_not_found(first: &PersonId, second: &PersonId) -> Self {
        Self::NotFound {
            entity: "relationship",
            id: format!("{first} / {second}"),
        }
    }

    /// Classify this error.
    pub const fn kind(&self) -> GenealogyErrorKind {
        match self {
            Self::NotFound { .. } => GenealogyErrorKind::NotFound,
            Self::InvariantViolation(_) => GenealogyErrorKind::InvariantViolation,
            Self::DuplicatePerson(_) => GenealogyErrorKind::DuplicatePerson,
            Self::DuplicateRelationship { .. } => GenealogyErrorKind::DuplicateRelationship,
            Self::ParentLimitExceeded { .. } => GenealogyErrorKind::ParentLimitExceeded,
            Self::CycleDetected { .. } => GenealogyErrorKind::CycleDetected,
            Self::AgeInconsistency { .. } => GenealogyErrorKind::AgeInconsistency,
            Self::InvalidRelationshipShape(_) => GenealogyErrorKind::InvalidRelationshipShape,
            Self::PersonHasRelationships { .. } => GenealogyErrorKind::PersonHasRelationships,
        }
    }

    /// Whether this is an invariant violation, generic or specialised.
    ///
    /// Only `NotFound` and `PersonHasRelationships` fall outside the family.
    pub const fn is_invariant_violation(&self) -> bool {
        !matches!(
            self,
            Self::NotFound { .. } | Self::PersonHasRelationships { .. }
        )
    }
}

impl From<ParseError> for GenealogyError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnknownRelationshipKind(_) => {
                Self::InvalidRelationshipShape(err.to_string())
            }
            ParseError::EmptyId(_) | ParseError::UnknownGender(_) | ParseError::UnknownViewMode(_) => {
                Self::InvariantViolation(err.to_string())
            }
        }
    }
}
