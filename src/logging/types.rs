//! Message kinds and the [`Log`] trait every backend implements.
use tracing::{Level, Metadata};

/// `tracing` target carrying stage headers.
pub(super) const STAGE_TARGET: &str = "psmod::stage";
/// `tracing` target carrying dry-run reports.
pub(super) const DRY_RUN_TARGET: &str = "psmod::dry_run";

/// What a message is for; decides how each sink renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// Start of a major step, e.g. `Installing Foo`.
    Stage,
    /// Normal progress output.
    Info,
    /// Detail shown only with `--verbose`, always kept in the log file.
    Debug,
    /// Something the user should look at; the command carries on.
    Warn,
    /// A failure.
    Error,
    /// A change a dry run would have made.
    DryRun,
}

impl LogKind {
    /// Recover the kind of a `tracing` event.
    ///
    /// Events from outside [`Logger`](super::Logger) are classified by
    /// level alone.
    #[must_use]
    pub fn of(metadata: &Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Short lowercase tag used in the log file.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DryRun => "dry-run",
        }
    }
}

/// A sink for the messages commands report.
///
/// Backends implement [`record`](Self::record); the per-kind methods are
/// shorthands for it.
pub trait Log: Send + Sync {
    /// Record `msg` as a message of `kind`.
    fn record(&self, kind: LogKind, msg: &str);

    /// Announce a major step.
    fn stage(&self, msg: &str) {
        self.record(LogKind::Stage, msg);
    }

    /// Report progress.
    fn info(&self, msg: &str) {
        self.record(LogKind::Info, msg);
    }

    /// Report detail for `--verbose` and the log file.
    fn debug(&self, msg: &str) {
        self.record(LogKind::Debug, msg);
    }

    /// Report a non-fatal problem.
    fn warn(&self, msg: &str) {
        self.record(LogKind::Warn, msg);
    }

    /// Report a failure.
    fn error(&self, msg: &str) {
        self.record(LogKind::Error, msg);
    }

    /// Report what a dry run would have changed.
    fn dry_run(&self, msg: &str) {
        self.record(LogKind::DryRun, msg);
    }
}
