//! Top-level subcommand orchestration.
pub mod completions;
pub mod install;
pub mod uninstall;
pub mod version;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::{Config, validation};
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::prompt::Prompter;
use crate::tasks::{self, Context, Task};

/// Environment variable naming the dotfiles root when `--root` is absent.
pub const ROOT_ENV: &str = "DOTFILES_ROOT";

/// Shared setup for commands that run tasks: root resolution, configuration
/// loading and validation, and the task [`Context`].
#[derive(Debug)]
pub struct CommandRunner {
    ctx: Context,
    log: Arc<Logger>,
}

impl CommandRunner {
    /// Resolve the root, load configuration and build the task context.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined, the
    /// configuration fails to parse, or no home directory is known.
    pub fn new(global: &GlobalOpts, log: &Arc<Logger>, prompter: Arc<dyn Prompter>) -> Result<Self> {
        let platform = Platform::detect();
        let cwd = std::env::current_dir().context("reading current directory")?;
        let env_root = std::env::var_os(ROOT_ENV).map(PathBuf::from);
        let root = resolve_root(global.root.as_deref(), env_root.as_deref(), &cwd)?;

        log.info(&format!("dotfiles-setup {}", version::version_string()));
        log.stage("Loading configuration");
        log.info(&format!("source root: {}", root.display()));
        let config = Config::load(&root)?;
        log.debug(&format!("{} placeholders", config.placeholder.len()));
        log.debug(&format!("{} tools", config.tool.len()));
        log.debug(&format!("{} link exclusions", config.link.exclude.len()));

        let warnings = validation::validate_all(&config, &root, &platform);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!("  {warning}"));
            }
        }

        let ctx = Context::new(
            Arc::new(config),
            Arc::new(platform),
            Arc::clone(log) as Arc<dyn Log>,
            prompter,
            Arc::new(SystemExecutor),
            global.home.clone(),
            global.dry_run,
        )?;
        if ctx.dry_run {
            log.dry_run("no changes will be made");
        }

        Ok(Self {
            ctx,
            log: Arc::clone(log),
        })
    }

    /// The task context shared by every task of this run.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.ctx
    }

    /// Run `tasks` in order, print the summary and fail if any task failed.
    ///
    /// # Errors
    ///
    /// Returns an error if one or more tasks recorded a failure.
    pub fn run<'a>(&self, tasks: impl IntoIterator<Item = &'a dyn Task>) -> Result<()> {
        run_tasks_to_completion(tasks, &self.ctx, &self.log)
    }
}

/// Execute every task in order, print the summary, and bail if any task failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    let summary = log.summary();
    if summary.has_failures() {
        anyhow::bail!("{} task(s) failed", summary.failed);
    }
    Ok(())
}

/// Resolve the dotfiles root: an explicit `--root`, then `DOTFILES_ROOT`,
/// then the working tree of the git repository containing `cwd`.
///
/// # Errors
///
/// Returns an error if the chosen directory does not exist or `cwd` is not
/// inside a git working tree.
pub fn resolve_root(explicit: Option<&Path>, env_root: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(root) = explicit.or(env_root) {
        return dunce::canonicalize(root)
            .with_context(|| format!("dotfiles root {} does not exist", root.display()));
    }

    let repo = git2::Repository::discover(cwd).with_context(|| {
        format!(
            "cannot determine dotfiles root from {}. Use --root or set {ROOT_ENV}",
            cwd.display()
        )
    })?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| anyhow::anyhow!("repository at {} is bare", repo.path().display()))?;
    Ok(dunce::canonicalize(workdir)?)
}
