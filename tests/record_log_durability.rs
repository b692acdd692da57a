//! Durability tests for the record-log backend
//!
//! Each test writes through a `PersonRepository`, drops it, and reopens the
//! same file to check what survived.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use phonebook::person::{NewPerson, PersonRepository, StoreError};
use phonebook::store::{open_backend, DocumentBackend, RecordLogBackend, StoreUrl};

fn open(path: &Path) -> PersonRepository {
    PersonRepository::new(Arc::new(RecordLogBackend::open(path).unwrap()))
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("persons.log");

    let created = {
        let people = open(&path);
        people
            .create(NewPerson::new("Arto Hellas", "040-123456"))
            .await
            .unwrap()
    };

    let people = open(&path);
    let found = people.find_by_id(&created.id.to_string()).await.unwrap();
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn test_updates_and_deletes_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("persons.log");

    let (kept, removed) = {
        let people = open(&path);
        let kept = people
            .create(NewPerson::new("Ada Lovelace", "39-445323523"))
            .await
            .unwrap();
        let removed = people
            .create(NewPerson::new("Dan Abramov", "12-43234345"))
            .await
            .unwrap();

        people
            .update_number(&kept.id.to_string(), Some("040-1111111"))
            .await
            .unwrap();
        people.delete(&removed.id.to_string()).await.unwrap();
        (kept, removed)
    };

    let people = open(&path);
    let all = people.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, kept.id);
    assert_eq!(all[0].name, "Ada Lovelace");
    assert_eq!(all[0].number, "040-1111111");

    assert_eq!(
        people.find_by_id(&removed.id.to_string()).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_order_preserved_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("persons.log");

    let names = ["Arto Hellas", "Ada Lovelace", "Dan Abramov", "Mary Poppendieck"];
    let expected: Vec<_> = {
        let people = open(&path);
        let mut created = Vec::new();
        for name in names {
            created.push(
                people
                    .create(NewPerson::new(name, "040-123456"))
                    .await
                    .unwrap(),
            );
        }
        // Updating must not move a record to the end.
        people
            .update_number(&created[0].id.to_string(), Some("040-654321"))
            .await
            .unwrap();
        created.iter().map(|p| p.id).collect()
    };

    let people = open(&path);
    let ids: Vec<_> = people.list_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_corrupted_byte_fails_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("persons.log");

    {
        let people = open(&path);
        people
            .create(NewPerson::new("Arto Hellas", "040-123456"))
            .await
            .unwrap();
    }

    let mut bytes = fs::read(&path).unwrap();
    let needle = b"Arto";
    let at = bytes
        .windows(needle.len())
        .position(|w| w == needle)
        .unwrap();
    bytes[at] = b'B';
    fs::write(&path, &bytes).unwrap();

    let err = match RecordLogBackend::open(&path) {
        Ok(_) => panic!("corrupted record log must not open"),
        Err(err) => err,
    };
    assert!(matches!(err, StoreError::Backend(_)));
    assert!(err.to_string().contains("Checksum mismatch"));
}

#[tokio::test]
async fn test_open_backend_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("data").join("persons.log");

    let backend = open_backend(&StoreUrl::RecordLog(path.clone()))
        .await
        .unwrap();
    assert_eq!(backend.kind(), "log");
    assert!(path.exists());

    let people = PersonRepository::new(backend);
    assert!(people.list_all().await.unwrap().is_empty());
}
