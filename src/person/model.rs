//! Person record shapes

use serde::{Deserialize, Serialize};

use super::id::PersonId;

/// A stored person, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub number: String,
}

impl Person {
    /// The stored body, without the id (the id is the record key).
    pub fn document(&self) -> PersonDocument {
        PersonDocument {
            name: self.name.clone(),
            number: self.number.clone(),
        }
    }

    pub fn from_document(id: PersonId, document: PersonDocument) -> Self {
        Self {
            id,
            name: document.name,
            number: document.number,
        }
    }
}

/// Body of a person record as written to a document backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDocument {
    pub name: String,
    pub number: String,
}

/// Unvalidated input for creating a person. Missing fields stay `None` so the
/// validator can report them as required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewPerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }
}
