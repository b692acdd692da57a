//! In-memory document index shared by both backends

use std::collections::{BTreeMap, HashMap};

use crate::person::{Person, PersonId};

/// Documents keyed by id, iterable in first-insertion order.
///
/// Replacing a document keeps its original position.
#[derive(Debug, Default)]
pub(crate) struct DocumentIndex {
    next_seq: u64,
    order: BTreeMap<u64, PersonId>,
    documents: HashMap<PersonId, (u64, Person)>,
}

impl DocumentIndex {
    pub fn contains(&self, id: &PersonId) -> bool {
        self.documents.contains_key(id)
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.documents.get(id).map(|(_, person)| person)
    }

    /// Inserts or replaces. Returns whether the id was already present.
    pub fn upsert(&mut self, person: Person) -> bool {
        if let Some((_, existing)) = self.documents.get_mut(&person.id) {
            *existing = person;
            return true;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, person.id);
        self.documents.insert(person.id, (seq, person));
        false
    }

    pub fn remove(&mut self, id: &PersonId) -> bool {
        match self.documents.remove(id) {
            Some((seq, _)) => {
                self.order.remove(&seq);
                true
            }
            None => false,
        }
    }

    pub fn all(&self) -> Vec<Person> {
        self.order
            .values()
            .filter_map(|id| self.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}
