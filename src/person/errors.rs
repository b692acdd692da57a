//! Record store adapter errors
//!
//! Not-found is not an error here: lookups return `Option`.

use thiserror::Error;

use super::id::MalformedId;
use super::validation::{FieldError, ValidationErrors};
use crate::storage::StorageError;

/// Result type for repository and backend operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The id was rejected before any query ran
    #[error("{0}")]
    MalformedIdentifier(#[from] MalformedId),

    /// A field failed validation; nothing was written
    #[error("{0}")]
    ValidationFailure(#[from] ValidationErrors),

    /// Anything the backend could not do
    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }
}

impl From<FieldError> for StoreError {
    fn from(error: FieldError) -> Self {
        StoreError::ValidationFailure(error.into())
    }
}

impl From<StorageError> for StoreError {
    fn from(error: StorageError) -> Self {
        StoreError::Backend(format!("[{}] {}", error.code(), error))
    }
}
