//! Error types for the model layer.

use super::index::IndexSpace;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur when manipulating models.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// An operation was handed an invalid index.
    #[error("invalid model index")]
    InvalidIndex,

    /// An index from the wrong space reached a single-space operation.
    #[error("index addresses the {found:?} space where {expected:?} was required")]
    SpaceMismatch {
        expected: IndexSpace,
        found: IndexSpace,
    },

    /// The addressed row does not exist under the given parent.
    #[error("row {row} does not exist under the given parent")]
    NoSuchRow { row: usize },
}
