//! Record file document backend
//!
//! Every write appends one checksummed record to the file and fsyncs it before
//! the in-memory index is updated. Opening the backend replays the file;
//! corruption anywhere in it fails the open.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::index::DocumentIndex;
use super::DocumentBackend;
use crate::person::{Person, PersonDocument, PersonId, StoreError, StoreResult};
use crate::storage::{DocumentRecord, RecordReader, RecordWriter, StorageError};

/// Document backend persisted to an append-only record file.
///
/// Writers serialise on the `RecordWriter` mutex, which is held across the
/// fsync on the blocking pool. Readers only touch the index lock, which is
/// never held during file I/O.
pub struct RecordLogBackend {
    writer: Arc<Mutex<RecordWriter>>,
    index: Arc<RwLock<DocumentIndex>>,
}

fn read_index(index: &RwLock<DocumentIndex>) -> StoreResult<RwLockReadGuard<'_, DocumentIndex>> {
    index
        .read()
        .map_err(|_| StoreError::backend("record log index lock poisoned"))
}

fn write_index(index: &RwLock<DocumentIndex>) -> StoreResult<RwLockWriteGuard<'_, DocumentIndex>> {
    index
        .write()
        .map_err(|_| StoreError::backend("record log index lock poisoned"))
}

fn append_live(writer: &mut RecordWriter, person: &Person) -> StoreResult<()> {
    let body = serde_json::to_vec(&person.document())
        .map_err(|e| StoreError::backend(format!("failed to encode {}: {}", person.id, e)))?;
    writer.append(&DocumentRecord::live(person.id.to_string(), body))?;
    Ok(())
}

impl RecordLogBackend {
    /// Opens (creating if needed) the record file and replays it.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let index = if path.exists() {
            Self::replay(path)?
        } else {
            DocumentIndex::default()
        };
        let writer = RecordWriter::open(path)?;

        tracing::info!(
            path = %path.display(),
            documents = index.len(),
            "record log opened"
        );

        Ok(Self {
            writer: Arc::new(Mutex::new(writer)),
            index: Arc::new(RwLock::new(index)),
        })
    }

    fn replay(path: &Path) -> StoreResult<DocumentIndex> {
        let mut reader = RecordReader::open(path)?;
        let mut index = DocumentIndex::default();

        loop {
            let offset = reader.current_offset();
            let Some(record) = reader.read_next()? else {
                break;
            };

            let id = PersonId::parse(&record.document_id).map_err(|e| {
                StorageError::corruption_at_offset(offset, format!("invalid document id: {}", e))
            })?;

            if record.is_tombstone {
                index.remove(&id);
                continue;
            }

            let document: PersonDocument = serde_json::from_slice(&record.document_body)
                .map_err(|e| {
                    StorageError::corruption_at_offset(
                        offset,
                        format!("invalid document body: {}", e),
                    )
                })?;
            index.upsert(Person::from_document(id, document));
        }

        Ok(index)
    }

    /// Runs a write on the blocking pool while holding the writer lock. The
    /// index is updated by `op` only after its append succeeds.
    async fn write<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut RecordWriter, &RwLock<DocumentIndex>) -> StoreResult<T> + Send + 'static,
    {
        let writer = Arc::clone(&self.writer);
        let index = Arc::clone(&self.index);
        tokio::task::spawn_blocking(move || {
            let mut writer = writer
                .lock()
                .map_err(|_| StoreError::backend("record log writer lock poisoned"))?;
            op(&mut writer, &index)
        })
        .await
        .map_err(|e| StoreError::backend(format!("record log write task failed: {}", e)))?
    }
}

#[async_trait]
impl DocumentBackend for RecordLogBackend {
    async fn all(&self) -> StoreResult<Vec<Person>> {
        Ok(read_index(&self.index)?.all())
    }

    async fn get(&self, id: PersonId) -> StoreResult<Option<Person>> {
        Ok(read_index(&self.index)?.get(&id).cloned())
    }

    async fn insert(&self, person: Person) -> StoreResult<()> {
        self.write(move |writer, index| {
            if read_index(index)?.contains(&person.id) {
                return Err(StoreError::backend(format!("duplicate id {}", person.id)));
            }
            append_live(writer, &person)?;
            write_index(index)?.upsert(person);
            Ok(())
        })
        .await
    }

    async fn replace(&self, person: Person) -> StoreResult<bool> {
        self.write(move |writer, index| {
            if !read_index(index)?.contains(&person.id) {
                return Ok(false);
            }
            append_live(writer, &person)?;
            write_index(index)?.upsert(person);
            Ok(true)
        })
        .await
    }

    async fn remove(&self, id: PersonId) -> StoreResult<bool> {
        self.write(move |writer, index| {
            if !read_index(index)?.contains(&id) {
                return Ok(false);
            }
            writer.append(&DocumentRecord::tombstone(id.to_string()))?;
            Ok(write_index(index)?.remove(&id))
        })
        .await
    }

    fn kind(&self) -> &'static str {
        "log"
    }
}
