//! Append-only record file writer
//!
//! Every append is followed by `sync_all`; a write is not acknowledged until
//! the record is durable.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::errors::{StorageError, StorageResult};
use super::record::DocumentRecord;

/// Appends records to the end of a record file.
pub struct RecordWriter {
    file: File,
    current_offset: u64,
}

impl RecordWriter {
    /// Opens or creates the record file, creating parent directories if needed.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Open {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|source| StorageError::Open {
                path: path.display().to_string(),
                source,
            })?;

        let current_offset = file.metadata().map_err(StorageError::ReadFailed)?.len();

        Ok(Self {
            file,
            current_offset,
        })
    }

    /// Appends one record and fsyncs. Returns the offset it was written at.
    ///
    /// On failure the file is cut back to its previous end, so a torn or
    /// unsynced record never precedes the next append.
    pub fn append(&mut self, record: &DocumentRecord) -> StorageResult<u64> {
        let serialized = record.serialize();
        let offset = self.current_offset;

        let result = self
            .file
            .write_all(&serialized)
            .and_then(|()| self.file.sync_all());

        if let Err(source) = result {
            self.discard_tail();
            return Err(StorageError::WriteFailed {
                document_id: record.document_id.clone(),
                source,
            });
        }

        self.current_offset += serialized.len() as u64;
        Ok(offset)
    }

    /// Truncates anything past the last acknowledged record.
    fn discard_tail(&mut self) {
        if let Err(e) = self.file.set_len(self.current_offset) {
            tracing::error!(
                offset = self.current_offset,
                "failed to truncate record file after a failed append: {}",
                e
            );
        }
    }
}
