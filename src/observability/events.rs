//! Lifecycle events
//!
//! Events are explicit and typed so startup and shutdown lines are easy to
//! grep for.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration resolved
    ConfigLoaded,
    /// Document backend opened
    StoreOpened,
    /// Listener bound, serving requests
    ServerListening,
    /// Shutdown signal received
    ShutdownStart,
    /// Server drained and stopped
    ShutdownComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logs a lifecycle event with a free-form detail string.
pub fn log_event(event: Event, detail: &str) {
    tracing::info!(event = event.as_str(), "{}", detail);
}
