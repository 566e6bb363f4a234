//! Logging sink for prompt diagnostics
//!
//! The prompt engine never reaches for a global logger directly. It is handed
//! a [`LogSink`], which in production forwards to `tracing` and in tests
//! records entries for assertions.

use std::cell::RefCell;

use strum::{Display, EnumString};
use tracing_subscriber::EnvFilter;

/// Severity of a prompt log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Debug,
    Warning,
}

/// Destination for engine log entries.
///
/// Failures inside a sink are the sink's own business; the engine does not
/// observe them.
pub trait LogSink {
    fn log(&self, severity: Severity, message: &str);
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message);
    }
}

/// Forwards entries to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!(target: "operator_prompt", "{}", message),
            Severity::Warning => tracing::warn!(target: "operator_prompt", "{}", message),
        }
    }
}

/// A single recorded entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: RefCell<Vec<LogEntry>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in the order they were logged
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Messages logged at the given severity
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.severity == severity)
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }
}

impl LogSink for RecordingSink {
    fn log(&self, severity: Severity, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            severity,
            message: message.to_string(),
        });
    }
}

/// Install the stderr `tracing` subscriber used by the binary.
///
/// `RUST_LOG` wins over `default_filter` when set. Stdout is left alone so
/// accepted values can be captured by calling scripts.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed when embedded in a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
