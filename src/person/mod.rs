//! Person records
//!
//! The only entity this service stores. `PersonRepository` is the adapter the
//! HTTP layer talks to: it parses identifiers, validates fields and delegates
//! persistence to a `DocumentBackend`.

mod errors;
mod id;
mod model;
mod repository;
pub mod validation;

pub use errors::{StoreError, StoreResult};
pub use id::{MalformedId, PersonId};
pub use model::{NewPerson, Person, PersonDocument};
pub use repository::PersonRepository;
pub use validation::{FieldError, ValidationErrors};
