//! [`Log`] backend that keeps messages in memory for later inspection.
use std::sync::Mutex;

use super::types::{Log, LogKind};

/// One recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Kind the message was recorded as.
    pub kind: LogKind,
    /// Message text.
    pub message: String,
}

/// Logger that keeps every message, in order.
///
/// Commands take `&dyn Log`, so tests hand them a `MemoryLog` and then look
/// at what was reported, such as the `would ...` lines of a dry run.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Text of every message recorded as `kind`.
    #[must_use]
    pub fn messages(&self, kind: LogKind) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.message)
            .collect()
    }

    /// Messages recorded through [`Log::dry_run`].
    #[must_use]
    pub fn dry_runs(&self) -> Vec<String> {
        self.messages(LogKind::DryRun)
    }

    /// Messages recorded through [`Log::warn`].
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogKind::Warn)
    }
}

impl Log for MemoryLog {
    fn record(&self, kind: LogKind, msg: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                kind,
                message: msg.to_string(),
            });
        }
    }
}
