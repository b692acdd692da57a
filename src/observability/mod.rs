//! Observability
//!
//! - `logger`: installs the global `tracing` subscriber (pretty or JSON)
//! - `events`: typed lifecycle events, one log line each
//! - `access_log`: one line per HTTP request

pub mod access_log;
mod events;
mod logger;

pub use events::{log_event, Event};
pub use logger::{init_tracing, LogFormat};
