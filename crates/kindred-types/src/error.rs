//! Parse errors for the shared value types.

/// Errors produced when raw input cannot be turned into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An identifier was empty or contained only whitespace.
    #[error("{0} must not be empty")]
    EmptyId(&'static str),

    /// A gender string was not one of `MALE`, `FEMALE`, `UNKNOWN`.
    #[error("invalid gender: {0:?}")]
    UnknownGender(String),

    /// A relationship kind string was not recognised.
    #[error("invalid relationship kind: {0:?}")]
    UnknownRelationshipKind(String),

    /// A view mode string was not recognised.
    #[error("invalid view mode: {0:?}")]
    UnknownViewMode(String),
}
