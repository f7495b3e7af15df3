//! Console and log-file rendering of `tracing` events.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;
use tracing::field::{Field, Visit};

use super::utils::{log_file_path, strip_ansi, utc_now};

pub(super) const STAGE_TARGET: &str = "dotfiles_setup::stage";
pub(super) const DRY_RUN_TARGET: &str = "dotfiles_setup::dry_run";

/// What an event represents, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    Info,
    Verbose,
    Warn,
    Error,
}

impl Kind {
    fn of(event: &tracing::Event<'_>) -> Self {
        let metadata = event.metadata();
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Verbose,
        }
    }

    fn console(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::DryRun => format!("  \x1b[36m[dry run]\x1b[0m {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Verbose => format!("  \x1b[2m{msg}\x1b[0m"),
            Self::Warn => format!("\x1b[33mwarning:\x1b[0m {msg}"),
            Self::Error => format!("\x1b[1;31merror:\x1b[0m {msg}"),
        }
    }

    fn file(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("==> {msg}"),
            Self::Info => format!("    {msg}"),
            Self::DryRun => format!("    [dry run] {msg}"),
            Self::Verbose => format!("    [debug] {msg}"),
            Self::Warn => format!("    [warn] {msg}"),
            Self::Error => format!("    [error] {msg}"),
        }
    }
}

/// Pulls the formatted `message` field out of an event.
#[derive(Default)]
struct Message(String);

impl Message {
    fn of(event: &tracing::Event<'_>) -> String {
        let mut visitor = Self::default();
        event.record(&mut visitor);
        visitor.0
    }
}

impl Visit for Message {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

/// Appends every event to the per-command log file, timestamped and with
/// ANSI codes removed.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command` and write the run header.
    ///
    /// `None` when the cache directory or the file is unavailable; the run
    /// then logs to the console only.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let header = format!(
            "# dotfiles-setup {} {command}, started {} UTC\n",
            crate::commands::version::version_string(),
            utc_now("%Y-%m-%d %H:%M:%S"),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let line = Kind::of(event).file(&strip_ansi(&Message::of(event)));
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "[{}] {line}", utc_now("%H:%M:%S")).ok();
        }
    }
}

/// Console event format: stage headers, indented progress, tagged warnings.
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
        writeln!(writer, "{}", Kind::of(event).console(&Message::of(event)))
    }
}

/// Install the global subscriber for `command`.
///
/// Warnings and errors go to stderr, everything else to stdout. `verbose`
/// lowers the console filter to `DEBUG`; the log file always receives
/// `DEBUG`. Call once, before the first message.
pub fn init_subscriber(verbose: bool, command: &str) {
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
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .event_format(ConsoleFormat)
                .with_writer(writer)
                .with_filter(console_level),
        )
        .with(FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG)))
        .init();
}
