//! Task outcomes recorded during a setup run and the [`Log`] trait.
use std::fmt;

/// How a setup step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The step applied its changes (or found nothing left to change).
    Ok,
    /// Nothing to do on this host: no placeholders, no tools, no shell.
    NotApplicable,
    /// The step was declined at a prompt or filtered out with `--skip`.
    Skipped,
    /// The step only reported what it would change.
    DryRun,
    /// The step returned an error; later steps still ran.
    Failed,
}

impl TaskStatus {
    /// Short word shown in the summary column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "done",
            Self::NotApplicable => "n/a",
            Self::Skipped => "skipped",
            Self::DryRun => "dry run",
            Self::Failed => "FAILED",
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Ok => "\x1b[32m",
            Self::NotApplicable => "\x1b[2m",
            Self::Skipped => "\x1b[33m",
            Self::DryRun => "\x1b[36m",
            Self::Failed => "\x1b[1;31m",
        }
    }
}

/// One line of the end-of-run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Step name as shown in stage headers.
    pub name: String,
    /// How the step ended.
    pub status: TaskStatus,
    /// Why it was skipped or how it failed.
    pub detail: Option<String>,
}

impl TaskEntry {
    /// Render the entry as a colored summary row.
    pub(super) fn row(&self) -> String {
        let detail = self
            .detail
            .as_deref()
            .map_or_else(String::new, |d| format!(": {d}"));
        format!(
            "{}{:<8}\x1b[0m {}{detail}",
            self.status.color(),
            self.status.label(),
            self.name
        )
    }
}

/// Per-status counts over every recorded step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Steps that completed.
    pub ok: usize,
    /// Steps with nothing to do on this host.
    pub not_applicable: usize,
    /// Steps declined or filtered out.
    pub skipped: usize,
    /// Steps that ran in dry-run mode.
    pub dry_run: usize,
    /// Steps that failed.
    pub failed: usize,
}

impl Summary {
    /// Count the entries by status.
    #[must_use]
    pub fn tally<'a>(entries: impl IntoIterator<Item = &'a TaskEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |mut s, entry| {
            match entry.status {
                TaskStatus::Ok => s.ok += 1,
                TaskStatus::NotApplicable => s.not_applicable += 1,
                TaskStatus::Skipped => s.skipped += 1,
                TaskStatus::DryRun => s.dry_run += 1,
                TaskStatus::Failed => s.failed += 1,
            }
            s
        })
    }

    /// Number of steps recorded.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.ok + self.not_applicable + self.skipped + self.dry_run + self.failed
    }

    /// Whether any step failed, which makes the run exit non-zero.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} step(s): {} done", self.total(), self.ok)?;
        for (count, label) in [
            (self.not_applicable, "n/a"),
            (self.skipped, "skipped"),
            (self.dry_run, "dry run"),
            (self.failed, "failed"),
        ] {
            if count > 0 {
                write!(f, ", {count} {label}")?;
            }
        }
        Ok(())
    }
}

/// Output sink shared by commands, tasks and resources.
///
/// Tasks only see `&dyn Log` through their context so tests can swap in a
/// logger with an isolated subscriber.
pub trait Log: Send + Sync {
    /// Announce a setup step (`==>` header).
    fn stage(&self, msg: &str);
    /// Report progress.
    fn info(&self, msg: &str);
    /// Detail shown only with `--verbose`; always written to the log file.
    fn debug(&self, msg: &str);
    /// A recoverable problem, such as a tool that failed to install.
    fn warn(&self, msg: &str);
    /// A failure that will make the run exit non-zero.
    fn error(&self, msg: &str);
    /// An action skipped because of `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Record how a step ended, for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, detail: Option<&str>);
}
