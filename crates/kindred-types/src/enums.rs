//! Enumeration types shared across the Kindred workspace.
//!
//! Every enum accepts its wire spelling case-insensitively through
//! [`FromStr`], which is how import rows and request parameters reach the
//! typed world.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Recorded gender of a person.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Not recorded or not known.
    #[default]
    Unknown,
}

impl Gender {
    /// Wire spelling of the variant.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(ParseError::UnknownGender(s.to_owned())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RelationshipKind
// ---------------------------------------------------------------------------

/// The two relationship kinds a tree can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum RelationshipKind {
    /// Directed edge from a parent to a child.
    ParentChild,
    /// Undirected edge between two spouses.
    Spouse,
}

impl RelationshipKind {
    /// Wire spelling of the variant.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParentChild => "PARENT_CHILD",
            Self::Spouse => "SPOUSE",
        }
    }
}

impl FromStr for RelationshipKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PARENT_CHILD" => Ok(Self::ParentChild),
            "SPOUSE" => Ok(Self::Spouse),
            _ => Err(ParseError::UnknownRelationshipKind(s.to_owned())),
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ViewMode
// ---------------------------------------------------------------------------

/// Layout hint forwarded untouched to the renderer.
///
/// Generation levels are computed the same way for every mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum ViewMode {
    /// Generations stacked top to bottom.
    #[default]
    Vertical,
    /// Generations laid out left to right.
    Horizontal,
    /// Generations as concentric rings around the root.
    Radial,
}

impl ViewMode {
    /// Wire spelling of the variant.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "VERTICAL",
            Self::Horizontal => "HORIZONTAL",
            Self::Radial => "RADIAL",
        }
    }
}

impl FromStr for ViewMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VERTICAL" => Ok(Self::Vertical),
            "HORIZONTAL" => Ok(Self::Horizontal),
            "RADIAL" => Ok(Self::Radial),
            _ => Err(ParseError::UnknownViewMode(s.to_owned())),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
