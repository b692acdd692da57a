//! Record file storage
//!
//! The on-disk half of the `log://` document backend: an append-only file of
//! checksummed records, one per document write.
//!
//! # Design
//!
//! - Append-only (no in-place updates)
//! - Checksum verified on every read
//! - Deletes are written as tombstones
//! - Latest record wins for the same document id
//! - Every write is fsynced before it is acknowledged

mod checksum;
mod errors;
mod reader;
mod record;
mod writer;

pub use errors::{StorageError, StorageResult};
pub use reader::RecordReader;
pub use record::DocumentRecord;
pub use writer::RecordWriter;
