//! Task: offer to change the login shell.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resource_states};
use crate::resources::shell::DefaultShellResource;
use crate::resources::{Resource as _, ResourceState};

/// Change the login shell to the configured shell.
#[derive(Debug)]
pub struct ConfigureShell;

impl Task for ConfigureShell {
    fn name(&self) -> &'static str {
        "Configure default shell"
    }

    fn id(&self) -> &'static str {
        "shell"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        // chsh needs a password prompt, which CI cannot answer
        ctx.config.shell.enabled
            && ctx.platform.supports_chsh()
            && !ctx.platform.is_ci
            && ctx.executor.which(&ctx.config.shell.name)
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let shell = &ctx.config.shell.name;
        let resource = DefaultShellResource::from_env(shell.clone(), &*ctx.executor);
        let state = resource.current_state()?;

        if state != ResourceState::Correct && !ctx.dry_run {
            let question = format!("Change your login shell to {shell}?");
            if !ctx.confirm(&question, true) {
                return Ok(TaskResult::Skipped("declined".to_string()));
            }
        }

        process_resource_states(
            ctx,
            std::iter::once((resource, state)),
            &ProcessOpts::apply_all("change"),
        )
    }
}
