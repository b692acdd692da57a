//! Document backends
//!
//! A backend persists whole person documents keyed by id and guarantees
//! single-document atomicity for each write. It knows nothing about
//! validation; that is the repository's job.
//!
//! Backends are selected by a store URL:
//!
//! - `memory://` keeps documents in process memory
//! - `log://<path>` keeps them in an append-only checksummed record file

mod index;
mod memory;
mod record_log;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::person::{Person, PersonId, StoreResult};

pub use memory::MemoryBackend;
pub use record_log::RecordLogBackend;

/// Persistence engine behind `PersonRepository`.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Every stored person, in insertion order.
    async fn all(&self) -> StoreResult<Vec<Person>>;

    async fn get(&self, id: PersonId) -> StoreResult<Option<Person>>;

    /// Stores a new person. The id must not already exist.
    async fn insert(&self, person: Person) -> StoreResult<()>;

    /// Overwrites an existing person. Returns `false` if the id is gone.
    async fn replace(&self, person: Person) -> StoreResult<bool>;

    /// Removes a person. Returns whether anything was removed.
    async fn remove(&self, id: PersonId) -> StoreResult<bool>;

    /// Short backend name for log lines.
    fn kind(&self) -> &'static str;
}

/// Where documents live, parsed from a store URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    Memory,
    RecordLog(PathBuf),
}

impl FromStr for StoreUrl {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw == "memory://" || raw == "memory" {
            return Ok(StoreUrl::Memory);
        }
        match raw.strip_prefix("log://") {
            Some("") => Err(format!("store URL '{}' is missing a file path", raw)),
            Some(path) => Ok(StoreUrl::RecordLog(PathBuf::from(path))),
            None => Err(format!(
                "unsupported store URL '{}': expected memory:// or log://<path>",
                raw
            )),
        }
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreUrl::Memory => write!(f, "memory://"),
            StoreUrl::RecordLog(path) => write!(f, "log://{}", path.display()),
        }
    }
}

/// Opens the backend a store URL points at.
///
/// Opening a record log replays the whole file, so this runs on the blocking
/// pool.
pub async fn open_backend(url: &StoreUrl) -> StoreResult<Arc<dyn DocumentBackend>> {
    match url {
        StoreUrl::Memory => Ok(Arc::new(MemoryBackend::new())),
        StoreUrl::RecordLog(path) => {
            let path = path.clone();
            let backend = tokio::task::spawn_blocking(move || RecordLogBackend::open(&path))
                .await
                .map_err(|e| crate::person::StoreError::backend(format!("open task failed: {}", e)))??;
            Ok(Arc::new(backend))
        }
    }
}
