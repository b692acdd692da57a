//! phonebook - a small REST service for names and phone numbers
//!
//! Layers, leaf to root:
//!
//! - `storage`: checksummed record file primitives
//! - `store`: document backends (in-memory, record log)
//! - `person`: the Person model, validation and repository
//! - `http_server`: routes, error normalization and server bootstrap
//! - `cli`: configuration and startup

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod person;
pub mod storage;
pub mod store;
