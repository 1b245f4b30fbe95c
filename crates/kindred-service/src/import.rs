//! Batch import of persons and relationships into one tree.
//!
//! Rows are applied in order to a single loaded aggregate. A rejected row is
//! recorded and skipped; later rows still run against the state left by the
//! rows that were accepted.

use serde::{Deserialize, Serialize};

use kindred_graph::{GenealogyError, GenealogyGraph};
use kindred_types::{PersonId, PersonRecord, RelationshipKind};

/// One line of an import batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImportRow {
    /// Add a person.
    Person(PersonRecord),
    /// Link two persons. `kind` is a relationship kind name such as
    /// `PARENT_CHILD` or `spouse`; for parent-child, `first` is the parent.
    Relationship {
        /// Relationship kind as written in the source data.
        kind: String,
        /// Parent, or either spouse.
        first: PersonId,
        /// Child, or the other spouse.
        second: PersonId,
    },
}

/// A row that was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    /// Zero-based position of the row in the batch.
    pub row: usize,
    /// Why the row was rejected.
    pub error: GenealogyError,
}

/// Outcome of an import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of rows applied.
    pub applied: usize,
    /// Rows that were rejected, in batch order.
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    /// Whether every row was applied.
    pub const fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply every row to `graph`, collecting failures.
pub(crate) fn apply_rows(graph: &mut GenealogyGraph, rows: &[ImportRow]) -> ImportReport {
    let mut report = ImportReport::default();
    for (index, row) in rows.iter().enumerate() {
        match apply_row(graph, row) {
            Ok(()) => report.applied = report.applied.saturating_add(1),
            Err(error) => report.failures.push(ImportFailure { row: index, error }),
        }
    }
    report
}

fn apply_row(graph: &mut GenealogyGraph, row: &ImportRow) -> Result<(), GenealogyError> {
    match row {
        ImportRow::Person(record) => graph.add_person(record.clone()).map(|_| ()),
        ImportRow::Relationship {
            kind,
            first,
            second,
        } => match kind.parse::<RelationshipKind>()? {
            RelationshipKind::ParentChild => graph.add_parent_child_relationship(first, second),
            RelationshipKind::Spouse => graph.add_spouse_relationship(first, second),
        },
    }
}
