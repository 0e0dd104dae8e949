//! Error types for the chainseq crate.

use thiserror::Error;

/// Errors that can occur when transforming or converting a sequence.
#[derive(Debug, Error)]
pub enum SeqError {
    /// Argument is not supported for the current container kind.
    #[error("invalid argument to {op}(): {reason}")]
    InvalidArgument { op: &'static str, reason: String },

    /// Searched item is absent from the sequence (or the searched window).
    #[error("{item} is not in the sequence")]
    NotFound { item: String },

    /// Fold over an empty sequence without an initial value.
    #[error("{op}() of empty sequence with no initial value")]
    EmptySequence { op: &'static str },

    /// Element cannot be represented as the target type.
    #[error("cannot convert {value} into {target}")]
    Conversion { value: String, target: &'static str },

    /// Index outside the bounds of the sequence.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl SeqError {
    pub(crate) fn invalid_argument(op: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(op, %reason, "rejected sequence argument");
        SeqError::InvalidArgument { op, reason }
    }

    pub(crate) fn conversion(value: impl std::fmt::Display, target: &'static str) -> Self {
        SeqError::Conversion {
            value: value.to_string(),
            target,
        }
    }
}

/// Result type for sequence operations.
pub type Result<T> = std::result::Result<T, SeqError>;
