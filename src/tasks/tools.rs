//! Task: install the optional tools.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resource_states};
use crate::resources::package::PackageManager;
use crate::resources::tool::ToolResource;
use crate::resources::{Applicable as _, Resource as _, ResourceState};

/// Install optional third-party tools that are not present yet.
#[derive(Debug)]
pub struct InstallTools;

impl Task for InstallTools {
    fn name(&self) -> &'static str {
        "Install tools"
    }

    fn id(&self) -> &'static str {
        "tools"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.tool.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let manager = PackageManager::detect(&ctx.platform, &*ctx.executor);
        if let Some(manager) = manager {
            ctx.log.debug(&format!("package manager: {manager}"));
        }

        let mut resource_states = Vec::with_capacity(ctx.config.tool.len());
        for tool in &ctx.config.tool {
            let resource = ToolResource::new(tool, &ctx.home, manager, &*ctx.executor);
            let state = resource.current_state()?;
            resource_states.push((resource, state));
        }

        let missing: Vec<String> = resource_states
            .iter()
            .filter(|(_, state)| *state == ResourceState::Missing)
            .map(|(resource, _)| resource.description())
            .collect();

        if !missing.is_empty() && !ctx.dry_run {
            let question = format!("Install {}?", missing.join(", "));
            if !ctx.confirm(&question, true) {
                return Ok(TaskResult::Skipped("declined".to_string()));
            }
        }

        process_resource_states(ctx, resource_states, &ProcessOpts::install_missing("install"))
    }
}
