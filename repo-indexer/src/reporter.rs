//! Structured event reporting.
//!
//! Components receive a [`Reporter`] at construction and send every event
//! through it as `(level, component, repository, message)`. The default
//! [`TracingReporter`] forwards to `tracing`; [`RecordingReporter`] keeps
//! events in memory.

use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, trace, warn, Level};

/// Sink for structured events.
pub trait Reporter: Send + Sync {
    /// Records one event.
    ///
    /// # Arguments
    ///
    /// * `level` - Severity
    /// * `component` - Emitting component (e.g. `"aggregator"`)
    /// * `repository` - Repository the event concerns, if any
    /// * `message` - Human-readable message
    fn log(&self, level: Level, component: &str, repository: Option<&str>, message: &str);

    fn debug(&self, component: &str, repository: Option<&str>, message: &str) {
        self.log(Level::DEBUG, component, repository, message);
    }

    fn info(&self, component: &str, repository: Option<&str>, message: &str) {
        self.log(Level::INFO, component, repository, message);
    }

    fn warn(&self, component: &str, repository: Option<&str>, message: &str) {
        self.log(Level::WARN, component, repository, message);
    }

    fn error(&self, component: &str, repository: Option<&str>, message: &str) {
        self.log(Level::ERROR, component, repository, message);
    }
}

/// Shared handle to a reporter.
pub type SharedReporter = Arc<dyn Reporter>;

/// Forwards events to the active `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    /// Returns a shared handle to a tracing reporter.
    pub fn shared() -> SharedReporter {
        Arc::new(Self)
    }
}

impl Reporter for TracingReporter {
    fn log(&self, level: Level, component: &str, repository: Option<&str>, message: &str) {
        match level {
            Level::ERROR => error!(component, repo = repository, "{message}"),
            Level::WARN => warn!(component, repo = repository, "{message}"),
            Level::INFO => info!(component, repo = repository, "{message}"),
            Level::DEBUG => debug!(component, repo = repository, "{message}"),
            _ => trace!(component, repo = repository, "{message}"),
        }
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub component: String,
    pub repository: Option<String>,
    pub message: String,
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded events, in order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Returns events for `repository` whose message contains `needle`.
    pub fn find(&self, repository: &str, needle: &str) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| {
                entry.repository.as_deref() == Some(repository) && entry.message.contains(needle)
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn log(&self, level: Level, component: &str, repository: Option<&str>, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                component: component.to_string(),
                repository: repository.map(str::to_string),
                message: message.to_string(),
            });
        }
    }
}
