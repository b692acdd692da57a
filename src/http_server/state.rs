//! Shared router state

use crate::person::PersonRepository;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub people: PersonRepository,
}

impl AppState {
    pub fn new(people: PersonRepository) -> Self {
        Self { people }
    }
}
