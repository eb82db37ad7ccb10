//! Error types for docmodel library.

use std::io;
use thiserror::Error;

/// Result type alias for docmodel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building, transforming or merging documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external form is not well-formed JSON or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An entity failed validation during construction.
    #[error("Invalid field `{field}`: {reason}")]
    Validation {
        /// Path of the offending field (e.g. `sections[0].blocks[2].coords`)
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// A block carried a label the resectioning scan refuses to route.
    #[error("Unrecognized block label {label:?} at position {position} of the reading order")]
    InvariantViolation {
        /// The offending label
        label: String,
        /// Index of the block in the sorted block pool
        position: usize,
    },

    /// Merge was called without any resource.
    #[error("Cannot merge an empty list of resources")]
    EmptyMerge,

    /// Two resources set different values for the same field.
    #[error("Merge conflict on `{field}`: {existing:?} is already set, got {incoming:?}")]
    MergeConflict {
        /// Name of the conflicting field
        field: &'static str,
        /// Value kept from the earlier resource
        existing: String,
        /// Value offered by the later resource
        incoming: String,
    },
}

impl Error {
    /// Create a validation error for a field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix the field path of a validation error with its parent location.
    ///
    /// Other variants are returned unchanged.
    pub fn within(self, parent: &str) -> Self {
        match self {
            Error::Validation { field, reason } => Error::Validation {
                field: format!("{}.{}", parent, field),
                reason,
            },
            other => other,
        }
    }

    /// Malformed input: bad arity, wrong type, unknown enumerated value.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::Json(_))
    }

    /// Unknown label rejected by the resectioning scan.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::InvariantViolation { .. })
    }

    /// Invalid merge arguments.
    pub fn is_argument(&self) -> bool {
        matches!(self, Error::EmptyMerge | Error::MergeConflict { .. })
    }
}
