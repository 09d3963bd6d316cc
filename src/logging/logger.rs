//! [`Log`] backend that turns messages into `tracing` events.
use std::path::{Path, PathBuf};

use super::types::{DRY_RUN_TARGET, Log, LogKind, STAGE_TARGET};

/// The logger commands use at runtime.
///
/// Each message becomes a `tracing` event; the subscriber installed by
/// [`init_subscriber`](super::init_subscriber) renders it on the console
/// and appends it to the per-command log file.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger that reports `log_file` as its log location.
    ///
    /// The file itself is opened by the subscriber, not here.
    #[must_use]
    pub const fn new(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }

    /// Where this run's log is written, if anywhere.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Mention the log file at debug level.
    pub fn print_log_location(&self) {
        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn record(&self, kind: LogKind, msg: &str) {
        match kind {
            LogKind::Stage => tracing::info!(target: STAGE_TARGET, "{msg}"),
            LogKind::DryRun => tracing::info!(target: DRY_RUN_TARGET, "{msg}"),
            LogKind::Info => tracing::info!("{msg}"),
            LogKind::Debug => tracing::debug!("{msg}"),
            LogKind::Warn => tracing::warn!("{msg}"),
            LogKind::Error => tracing::error!("{msg}"),
        }
    }
}
