//! Sequential record file reader
//!
//! Used to replay the file into memory when the backend opens. Every record's
//! checksum is verified; the first bad record aborts the scan.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{StorageError, StorageResult};
use super::record::{DocumentRecord, MIN_RECORD_SIZE};

/// Forward-only reader over a record file.
pub struct RecordReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl RecordReader {
    /// Opens the record file for reading.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = File::open(path).map_err(|source| StorageError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let file_size = file.metadata().map_err(StorageError::ReadFailed)?.len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Reads the next record.
    ///
    /// Returns `Ok(None)` at end of file and `Err(Corruption)` when the bytes
    /// at the current offset are not a valid record.
    pub fn read_next(&mut self) -> StorageResult<Option<DocumentRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StorageError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Truncated record file: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StorageError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 {
            return Err(StorageError::corruption_at_offset(
                self.current_offset,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if record_length > remaining {
            return Err(StorageError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Record length {} exceeds remaining file size {}",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StorageError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = DocumentRecord::deserialize(&record_buf)
            .map_err(|e| StorageError::corruption_at_offset(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;
        Ok(Some(record))
    }
}
