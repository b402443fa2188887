//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the collection logic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("unknown sort option: {0}")]
    UnknownSortOption(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("card {0} not found")]
    CardNotFound(i64),

    #[error("no card is being dragged")]
    NoDragSource,

    #[error("card {0} has no questionOrder")]
    MissingOrder(i64),

    #[error("failed to serialize share payload: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}
