//! Console and log-file output.
//!
//! Commands report through the [`Log`] trait. At runtime that is a
//! [`Logger`], which emits `tracing` events for the subscriber installed by
//! [`init_subscriber`]; tests pass a [`MemoryLog`] instead.

mod logger;
mod memory;
mod subscriber;
mod types;

pub use logger::Logger;
pub use memory::{LogEntry, MemoryLog};
pub use subscriber::init_subscriber;
pub use types::{Log, LogKind};

/// A [`Logger`] whose events go to a file in a fresh temp dir, via a
/// subscriber scoped to the current thread.
///
/// Keep the returned guard alive for the duration of the test.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (
    Logger,
    tempfile::TempDir,
    std::path::PathBuf,
    tracing::dispatcher::DefaultGuard,
) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("test.log");
    let file_layer =
        subscriber::FileLayer::create(&path, "test").expect("failed to create file layer");
    let log = Logger::new(Some(path.clone()));
    let subscriber =
        tracing_subscriber::registry().with(file_layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, tmp, path, guard)
}
