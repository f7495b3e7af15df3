//! Placeholder substitution task.
use anyhow::Result;

use super::processing::{apply_resource, process_single};
use super::{Context, ProcessOpts, Task, TaskResult, TaskStats};
use crate::config::placeholders::Placeholder;
use crate::exec::split_command;
use crate::resources::placeholder::PlaceholderResource;
use crate::resources::{Resource, ResourceState};

/// Fill `<TOKEN>` placeholders in tracked configuration files.
#[derive(Debug)]
pub struct FillPlaceholders;

impl Task for FillPlaceholders {
    fn name(&self) -> &'static str {
        "Fill placeholders"
    }

    fn id(&self) -> &'static str {
        "placeholders"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.placeholder.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let opts = ProcessOpts::apply_all("fill").no_bail();
        let mut stats = TaskStats::new();

        for placeholder in &ctx.config.placeholder {
            let resource =
                PlaceholderResource::new(ctx.root().join(&placeholder.file), placeholder.marker());
            let state = match resource.current_state() {
                Ok(state) => state,
                Err(e) => {
                    ctx.log
                        .warn(&format!("skipping {}: {e:#}", placeholder.marker()));
                    stats.skipped += 1;
                    continue;
                }
            };
            if state != ResourceState::Missing || ctx.dry_run {
                stats += process_single(ctx, &resource, state, &opts)?;
                continue;
            }

            match obtain_value(ctx, placeholder) {
                Some(value) => {
                    stats += apply_resource(ctx, &resource.with_value(value), &opts)?;
                }
                None => {
                    ctx.log
                        .info(&format!("left {} unset", placeholder.marker()));
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats.finish(ctx))
    }
}

/// Ask for a placeholder value, offering the output of `default_command`.
///
/// Returns `None` for an empty answer or a prompt that could not be answered.
fn obtain_value(ctx: &Context, placeholder: &Placeholder) -> Option<String> {
    let default = default_value(ctx, placeholder).unwrap_or_default();
    let prompt = placeholder.prompt_text();

    let answer = if placeholder.secret {
        if default.is_empty() {
            ctx.prompter.secret(prompt)
        } else {
            Ok(default)
        }
    } else {
        ctx.prompter.input(prompt, &default)
    };

    match answer {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => None,
        Err(e) => {
            ctx.log.warn(&format!("{prompt}: {e}"));
            None
        }
    }
}

/// Trimmed stdout of the placeholder's default command, when it succeeds.
fn default_value(ctx: &Context, placeholder: &Placeholder) -> Option<String> {
    let (program, args) = split_command(&placeholder.default_command)?;
    match ctx.executor.run_unchecked(program, &args) {
        Ok(result) if result.success => {
            let value = result.stdout.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        Ok(_) => None,
        Err(e) => {
            ctx.log
                .debug(&format!("default for {}: {e:#}", placeholder.token));
            None
        }
    }
}
