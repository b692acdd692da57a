//! Record file error types

use std::io;

use thiserror::Error;

/// Errors raised while reading or appending to the record file
#[derive(Debug, Error)]
pub enum StorageError {
    /// The record file or its directory could not be opened
    #[error("failed to open record file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Appending or fsyncing a record failed
    #[error("failed to write record for document {document_id}: {source}")]
    WriteFailed {
        document_id: String,
        #[source]
        source: io::Error,
    },

    /// Reading raw bytes from the file failed
    #[error("failed to read record file: {0}")]
    ReadFailed(#[source] io::Error),

    /// A record failed its checksum or structural checks
    #[error("data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },
}

impl StorageError {
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        StorageError::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Stable error code used in log lines
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::Open { .. } => "STORAGE_OPEN_FAILED",
            StorageError::WriteFailed { .. } => "STORAGE_WRITE_FAILED",
            StorageError::ReadFailed(_) => "STORAGE_READ_FAILED",
            StorageError::Corruption { .. } => "DATA_CORRUPTION",
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
