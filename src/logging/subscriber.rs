//! The global `tracing` subscriber: a console layer and a log-file layer.
//!
//! Both layers classify events with [`LogKind::of`] and differ only in how
//! they render a kind.
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::field::{Field, Visit};

use super::types::LogKind;

/// Pulls the `message` field out of an event.
#[derive(Default)]
struct MessageText(String);

impl Visit for MessageText {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0.clear();
            let _ = write!(self.0, "{value:?}");
        }
    }
}

fn classify(event: &tracing::Event<'_>) -> (LogKind, String) {
    let mut text = MessageText::default();
    event.record(&mut text);
    (LogKind::of(event.metadata()), text.0)
}

/// Console rendering of one message, ANSI styling included.
fn console_line(kind: LogKind, msg: &str) -> String {
    match kind {
        LogKind::Stage => format!("\x1b[1;36m::\x1b[0m \x1b[1m{msg}\x1b[0m"),
        LogKind::Info => format!("   {msg}"),
        LogKind::Debug => format!("   \x1b[2m{msg}\x1b[0m"),
        LogKind::Warn => format!("\x1b[33mwarning:\x1b[0m {msg}"),
        LogKind::Error => format!("\x1b[31merror:\x1b[0m {msg}"),
        LogKind::DryRun => format!("   \x1b[35m(dry run)\x1b[0m {msg}"),
    }
}

/// Log-file rendering of one message: plain text, one line, timestamped.
fn file_line(kind: LogKind, msg: &str) -> String {
    let ts = chrono::Utc::now().format("%H:%M:%S");
    format!("{ts} {:>7} {msg}", kind.tag())
}

/// Appends every event to a per-command log file.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Start a fresh log at `path` for a run of `command`.
    ///
    /// The parent directory is created if needed. Any previous log is
    /// replaced by a header naming the command, version, start time and
    /// working directory. Returns `None` if the file cannot be written.
    pub(super) fn create(path: &Path, command: &str) -> Option<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        let version =
            option_env!("PSMOD_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let cwd = std::env::current_dir()
            .map_or_else(|_| "?".to_string(), |d| d.display().to_string());
        let header = format!(
            "# psmod {command} ({version})\n# started {} UTC\n# cwd {cwd}\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let (kind, msg) = classify(event);
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{}", file_line(kind, &msg)).ok();
        }
    }
}

/// Console event format for the `fmt` layer.
struct ConsoleFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let (kind, msg) = classify(event);
        writeln!(writer, "{}", console_line(kind, &msg))
    }
}

/// Install the global subscriber. Call once, before anything logs.
///
/// Warnings and errors go to stderr, the rest to stdout; debug lines reach
/// the console only when `verbose`. When `log_file` is given, every event
/// at debug and above is also appended there.
pub fn init_subscriber(verbose: bool, command: &str, log_file: Option<&Path>) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));
    let console = fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file = log_file
        .and_then(|path| FileLayer::create(path, command))
        .map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn header_names_command_and_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logs").join("install.log");
        let _layer = FileLayer::create(&path, "install").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let header: Vec<&str> = contents.lines().collect();
        assert_eq!(header.len(), 3);
        assert!(header[0].starts_with("# psmod install ("));
        assert!(header[1].starts_with("# started ") && header[1].ends_with(" UTC"));
        assert!(header[2].starts_with("# cwd "));
    }

    #[test]
    fn create_replaces_previous_log() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("install.log");
        std::fs::write(&path, "old run\n").unwrap();
        let _layer = FileLayer::create(&path, "install").unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("old run"));
    }

    #[test]
    fn create_fails_when_parent_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("blocker"), "").unwrap();
        let path = tmp.path().join("blocker").join("install.log");
        assert!(FileLayer::create(&path, "install").is_none());
    }

    #[test]
    fn file_lines_are_plain_and_tagged() {
        let line = file_line(LogKind::DryRun, "would copy a");
        assert!(!line.contains('\x1b'));
        assert!(line.ends_with("dry-run would copy a"));
        assert_eq!(line.find(' '), Some(8), "HH:MM:SS prefix: {line}");
    }

    #[test]
    fn console_lines_distinguish_kinds() {
        assert!(console_line(LogKind::Warn, "w").starts_with("\x1b[33mwarning:"));
        assert!(console_line(LogKind::Error, "e").starts_with("\x1b[31merror:"));
        assert!(console_line(LogKind::DryRun, "d").contains("(dry run)"));
        assert_eq!(console_line(LogKind::Info, "i"), "   i");
    }
}
