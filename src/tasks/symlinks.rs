//! Tasks that link tracked files into home and remove those links again.
use anyhow::{Context as _, Result, bail};

use super::{Context, Task, TaskResult, TaskStats, process_resources_remove};
use crate::materialize::{
    ExclusionSet, MaterializeConfig, MaterializeReport, TrackedFile, materialize, tracked_files,
};
use crate::resources::link::HomeLink;

/// Link every tracked dotfile into the home directory.
#[derive(Debug)]
pub struct LinkDotfiles;

impl Task for LinkDotfiles {
    fn name(&self) -> &'static str {
        "Link dotfiles"
    }

    fn id(&self) -> &'static str {
        "links"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let tracked = load_tracked(ctx)?;
        let config = materialize_config(ctx);
        ctx.log.debug(&format!(
            "{} tracked paths, backups go to {}",
            tracked.len(),
            config.backup_root().display()
        ));

        let report = materialize(&config, &tracked, ctx.dry_run);
        log_report(ctx, &config, &report);

        if !report.is_success() {
            for failure in &report.failures {
                ctx.log.error(&failure.to_string());
            }
            bail!(
                "{} of {} paths could not be linked",
                report.failures.len(),
                report.failures.len() + report.linked.len()
            );
        }

        let stats = TaskStats {
            changed: count(report.changed()),
            already_ok: count(report.unchanged.len()),
            skipped: count(report.skipped.len()),
        };
        Ok(stats.finish(ctx))
    }
}

/// Remove home directory links that point into the dotfiles tree.
///
/// Backups are never restored or deleted.
#[derive(Debug)]
pub struct UnlinkDotfiles;

impl Task for UnlinkDotfiles {
    fn name(&self) -> &'static str {
        "Remove dotfile links"
    }

    fn id(&self) -> &'static str {
        "links"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let exclusions = exclusion_set(ctx);
        let resources: Vec<HomeLink> = load_tracked(ctx)?
            .into_iter()
            .filter(|file| !exclusions.is_excluded(file))
            .map(|file| {
                HomeLink::new(
                    ctx.root().join(&file.relative_path),
                    ctx.home.join(&file.relative_path),
                )
            })
            .collect();
        process_resources_remove(ctx, resources, "unlink")
    }
}

fn load_tracked(ctx: &Context) -> Result<Vec<TrackedFile>> {
    tracked_files(ctx.root())
        .with_context(|| format!("listing tracked files in {}", ctx.root().display()))
}

fn exclusion_set(ctx: &Context) -> ExclusionSet {
    ExclusionSet::new(ctx.config.link.exclude.iter().cloned())
}

fn materialize_config(ctx: &Context) -> MaterializeConfig {
    MaterializeConfig {
        source_root: ctx.root().to_path_buf(),
        target_root: ctx.home.clone(),
        exclusions: exclusion_set(ctx),
        run_timestamp: ctx.run_timestamp,
        backup_dir: ctx.config.link.backup_dir.clone(),
    }
}

fn log_report(ctx: &Context, config: &MaterializeConfig, report: &MaterializeReport) {
    for record in &report.backed_up {
        let msg = format!("{} to {}", record.path, record.backup.display());
        if ctx.dry_run {
            ctx.log.dry_run(&format!("would back up {msg}"));
        } else {
            ctx.log.info(&format!("backed up {msg}"));
        }
    }
    for path in report.linked.iter().filter(|p| !report.unchanged.contains(*p)) {
        let msg = format!(
            "{} -> {}",
            config.target_root.join(path).display(),
            config.source_root.join(path).display()
        );
        if ctx.dry_run {
            ctx.log.dry_run(&format!("would link {msg}"));
        } else {
            ctx.log.debug(&format!("linked {msg}"));
        }
    }
    for skipped in &report.skipped {
        ctx.log
            .debug(&format!("skipped {}: {}", skipped.path, skipped.reason));
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
