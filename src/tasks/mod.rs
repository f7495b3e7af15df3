//! Named tasks that orchestrate resource changes, run in a fixed order.
mod context;
pub mod placeholders;
mod processing;
pub mod shell;
pub mod symlinks;
pub mod tools;

pub use context::Context;
pub use processing::{
    ProcessOpts, TaskResult, TaskStats, process_resource_states, process_resources_remove,
};

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Short identifier accepted by `--skip` and `--only`.
    fn id(&self) -> &str;

    /// Whether this task should run on the current host.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails, such as when paths cannot be
    /// linked or the login shell cannot be changed.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The tasks run by the install command, in execution order.
///
/// Placeholders are filled before linking so linked files are complete the
/// first time a program reads them.
#[must_use]
pub fn all_install_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(placeholders::FillPlaceholders),
        Box::new(symlinks::LinkDotfiles),
        Box::new(tools::InstallTools),
        Box::new(shell::ConfigureShell),
    ]
}

/// The tasks run by the uninstall command.
#[must_use]
pub fn all_uninstall_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(symlinks::UnlinkDotfiles)]
}

/// Keep only tasks selected by `--only` (when non-empty) and not named by
/// `--skip`.
#[must_use]
pub fn filter_tasks(
    tasks: Vec<Box<dyn Task>>,
    only: &[String],
    skip: &[String],
) -> Vec<Box<dyn Task>> {
    tasks
        .into_iter()
        .filter(|task| only.is_empty() || only.iter().any(|id| id == task.id()))
        .filter(|task| !skip.iter().any(|id| id == task.id()))
        .collect()
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}
