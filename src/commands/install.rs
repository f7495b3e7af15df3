//! The `install` subcommand.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::Logger;
use crate::prompt::Prompter;
use crate::tasks;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if configuration loading fails, an unknown task id is
/// passed to `--skip`/`--only`, or any task fails.
pub fn run(
    global: &GlobalOpts,
    opts: &InstallOpts,
    log: &Arc<Logger>,
    prompter: Arc<dyn Prompter>,
) -> Result<()> {
    check_task_ids(&opts.only)?;
    check_task_ids(&opts.skip)?;

    let runner = super::CommandRunner::new(global, log, prompter)?;
    let selected = tasks::filter_tasks(tasks::all_install_tasks(), &opts.only, &opts.skip);
    runner.run(selected.iter().map(Box::as_ref))
}

/// Reject task ids that no install task answers to.
fn check_task_ids(ids: &[String]) -> Result<()> {
    let all = tasks::all_install_tasks();
    let known: Vec<&str> = all.iter().map(|t| t.id()).collect();
    if let Some(unknown) = ids.iter().find(|id| !known.contains(&id.as_str())) {
        anyhow::bail!(
            "unknown task '{unknown}' (expected one of: {})",
            known.join(", ")
        );
    }
    Ok(())
}
