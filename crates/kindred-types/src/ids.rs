//! Type-safe identifier wrappers.
//!
//! Identifiers are caller-supplied strings (an import file or a client may
//! choose them), so they wrap [`String`] rather than [`Uuid`]. The only rule
//! is that an identifier is never blank. [`Uuid`] v7 strings are available
//! through `generate()` when the application has to mint an ID itself.
//!
//! Ordering is plain lexicographic ordering of the underlying string. The
//! graph relies on it to store spouse pairs canonically.

use core::fmt;
use core::str::FromStr;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ParseError;

/// Generates a validated newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(try_from = "String")]
        #[ts(export, export_to = "bindings/", type = "string")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier, rejecting empty or whitespace-only input.
            pub fn new(value: impl Into<String>) -> Result<Self, ParseError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ParseError::EmptyId($label));
                }
                Ok(Self(value))
            }

            /// Mint a fresh identifier from a UUID v7 (time-ordered).
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`].
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ParseError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Stable, immutable identifier of a person within a tree.
    PersonId, "person id"
}

define_id! {
    /// Identifier of one family tree (one aggregate).
    TreeId, "tree id"
}
