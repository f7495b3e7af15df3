//! Uninstall command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::prompt::Prompter;
use crate::tasks;

/// Run the uninstall command.
///
/// Only links pointing into the dotfiles repository are removed; backups
/// are left alone.
///
/// # Errors
///
/// Returns an error if configuration loading or task execution fails.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>, prompter: Arc<dyn Prompter>) -> Result<()> {
    let runner = super::CommandRunner::new(global, log, prompter)?;
    let tasks = tasks::all_uninstall_tasks();
    runner.run(tasks.iter().map(Box::as_ref))
}
