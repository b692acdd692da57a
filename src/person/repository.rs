//! Record store adapter
//!
//! Turns raw request inputs (string ids, optional fields) into backend calls.
//! Identifier shape is checked before any backend call; fields are validated
//! before anything is written.

use std::sync::Arc;

use super::errors::StoreResult;
use super::id::PersonId;
use super::model::{NewPerson, Person};
use super::validation::{validate_new_person, validate_number};
use crate::store::DocumentBackend;

#[derive(Clone)]
pub struct PersonRepository {
    backend: Arc<dyn DocumentBackend>,
}

impl PersonRepository {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    /// All people in store order. An empty store yields an empty list.
    pub async fn list_all(&self) -> StoreResult<Vec<Person>> {
        self.backend.all().await
    }

    /// `Ok(None)` when no person has this id.
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>> {
        let id = PersonId::parse(id)?;
        self.backend.get(id).await
    }

    /// Validates and stores a new person under a fresh id.
    pub async fn create(&self, draft: NewPerson) -> StoreResult<Person> {
        let (name, number) = validate_new_person(draft.name.as_deref(), draft.number.as_deref())?;

        let person = Person {
            id: PersonId::generate(),
            name,
            number,
        };
        self.backend.insert(person.clone()).await?;

        tracing::debug!(id = %person.id, "person created");
        Ok(person)
    }

    /// Replaces the number of an existing person. The name never changes.
    ///
    /// `Ok(None)` when no person has this id, including when it was deleted
    /// between the lookup and the write.
    pub async fn update_number(&self, id: &str, number: Option<&str>) -> StoreResult<Option<Person>> {
        let id = PersonId::parse(id)?;
        let Some(mut person) = self.backend.get(id).await? else {
            return Ok(None);
        };

        person.number = validate_number(number)?;

        if !self.backend.replace(person.clone()).await? {
            return Ok(None);
        }

        tracing::debug!(id = %person.id, "person number updated");
        Ok(Some(person))
    }

    /// Removes a person if present. Deleting an unknown id is not an error.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let id = PersonId::parse(id)?;
        if self.backend.remove(id).await? {
            tracing::debug!(%id, "person deleted");
        }
        Ok(())
    }
}
