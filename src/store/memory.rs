//! In-process document backend

use std::sync::RwLock;

use async_trait::async_trait;

use super::index::DocumentIndex;
use super::DocumentBackend;
use crate::person::{Person, PersonId, StoreError, StoreResult};

/// Keeps documents in memory. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    index: RwLock<DocumentIndex>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("memory backend lock poisoned")
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn all(&self) -> StoreResult<Vec<Person>> {
        let index = self.index.read().map_err(|_| poisoned())?;
        Ok(index.all())
    }

    async fn get(&self, id: PersonId) -> StoreResult<Option<Person>> {
        let index = self.index.read().map_err(|_| poisoned())?;
        Ok(index.get(&id).cloned())
    }

    async fn insert(&self, person: Person) -> StoreResult<()> {
        let mut index = self.index.write().map_err(|_| poisoned())?;
        if index.contains(&person.id) {
            return Err(StoreError::backend(format!("duplicate id {}", person.id)));
        }
        index.upsert(person);
        Ok(())
    }

    async fn replace(&self, person: Person) -> StoreResult<bool> {
        let mut index = self.index.write().map_err(|_| poisoned())?;
        if !index.contains(&person.id) {
            return Ok(false);
        }
        index.upsert(person);
        Ok(true)
    }

    async fn remove(&self, id: PersonId) -> StoreResult<bool> {
        let mut index = self.index.write().map_err(|_| poisoned())?;
        Ok(index.remove(&id))
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, number: &str) -> Person {
        Person {
            id: PersonId::generate(),
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let backend = MemoryBackend::new();
        let p = person("Arto Hellas", "040-123456");

        backend.insert(p.clone()).await.unwrap();
        assert_eq!(backend.get(p.id).await.unwrap(), Some(p.clone()));

        assert!(backend.remove(p.id).await.unwrap());
        assert!(!backend.remove(p.id).await.unwrap());
        assert_eq!(backend.get(p.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let backend = MemoryBackend::new();
        let p = person("Arto Hellas", "040-123456");

        backend.insert(p.clone()).await.unwrap();
        let err = backend.insert(p).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn test_replace_missing_returns_false() {
        let backend = MemoryBackend::new();
        let replaced = backend
            .replace(person("Arto Hellas", "040-123456"))
            .await
            .unwrap();
        assert!(!replaced);
        assert!(backend.all().await.unwrap().is_empty());
    }
}
