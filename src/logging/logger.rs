//! The [`Logger`] used by every command.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, Summary, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Sends messages to the global `tracing` subscriber and remembers how each
/// setup step ended.
///
/// The file layer installed by [`init_subscriber`](super::init_subscriber)
/// writes the same messages to `$XDG_CACHE_HOME/dotfiles-setup/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command` (`install` or `uninstall`).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Steps recorded so far, in execution order.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.entries.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Counts of the recorded steps by status.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.entries
            .lock()
            .map_or_else(|_| Summary::default(), |g| Summary::tally(g.iter()))
    }

    /// Log one row per recorded step, the totals and the log file location.
    pub fn print_summary(&self) {
        let entries = self.task_entries();
        if entries.is_empty() {
            return;
        }
        self.stage("Summary");
        for entry in &entries {
            self.info(&entry.row());
        }
        self.info(&Summary::tally(&entries).to_string());
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mfull log: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, detail: Option<&str>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                detail: detail.map(String::from),
            });
        }
    }
}
