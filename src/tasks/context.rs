//! Shared state handed to every task.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, Local};

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;
use crate::prompt::Prompter;

/// Shared context for task execution.
pub struct Context {
    /// Configuration loaded from `conf/setup.toml`.
    pub config: Arc<Config>,
    /// Detected platform information.
    pub platform: Arc<Platform>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Source of answers for interactive questions.
    pub prompter: Arc<dyn Prompter>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// Target root for links (the user's home directory).
    pub home: PathBuf,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Start of the run; names the backup directory.
    pub run_timestamp: DateTime<Local>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.config.root)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("prompter", &"<dyn Prompter>")
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("executor", &self.executor)
            .field("run_timestamp", &self.run_timestamp)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    ///
    /// `home` overrides the target root; otherwise `HOME` is used. Either way
    /// the directory must exist and is canonicalised.
    ///
    /// # Errors
    ///
    /// Returns an error if no home override is given and `HOME` is not set,
    /// or the home directory does not exist.
    pub fn new(
        config: Arc<Config>,
        platform: Arc<Platform>,
        log: Arc<dyn Log>,
        prompter: Arc<dyn Prompter>,
        executor: Arc<dyn Executor>,
        home: Option<PathBuf>,
        dry_run: bool,
    ) -> Result<Self> {
        let home = match home {
            Some(home) => home,
            None => std::env::var_os("HOME")
                .map(PathBuf::from)
                .ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))?,
        };
        let home = dunce::canonicalize(&home)
            .with_context(|| format!("home directory {} does not exist", home.display()))?;
        if !home.is_dir() {
            bail!("home directory {} is not a directory", home.display());
        }

        Ok(Self {
            config,
            platform,
            log,
            prompter,
            dry_run,
            home,
            executor,
            run_timestamp: Local::now(),
        })
    }

    /// Root directory of the dotfiles repository.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.config.root
    }

    /// Ask a yes/no question. A prompt that cannot be answered counts as
    /// "no" and is logged.
    #[must_use]
    pub fn confirm(&self, message: &str, default: bool) -> bool {
        match self.prompter.confirm(message, default) {
            Ok(answer) => answer,
            Err(e) => {
                self.log.warn(&format!("{message}: {e}"));
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use crate::logging::Logger;
    use crate::prompt::MockPrompter;
    use crate::tasks::test_helpers::{WhichExecutor, empty_config, make_context, make_linux_context};

    #[test]
    fn root_returns_config_root() {
        let ctx = make_linux_context(empty_config(PathBuf::from("/dotfiles")));
        assert_eq!(ctx.root(), std::path::Path::new("/dotfiles"));
    }

    fn new_context(home: PathBuf) -> Result<Context> {
        Context::new(
            Arc::new(empty_config(PathBuf::from("/dotfiles"))),
            Arc::new(Platform::detect()),
            Arc::new(Logger::new("test")),
            Arc::new(crate::prompt::AssumeYes),
            Arc::new(crate::exec::SystemExecutor),
            Some(home),
            true,
        )
    }

    #[test]
    fn explicit_home_overrides_env() {
        let home = tempfile::tempdir().unwrap();
        let ctx = new_context(home.path().join(".")).unwrap();
        assert_eq!(ctx.home, dunce::canonicalize(home.path()).unwrap());
        assert!(ctx.dry_run);
    }

    #[test]
    fn missing_home_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = new_context(dir.path().join("hmoe")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(!dir.path().join("hmoe").exists());
    }

    #[test]
    fn home_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("home");
        std::fs::write(&file, "").unwrap();
        let err = new_context(file).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn confirm_treats_prompt_errors_as_no() {
        let mut mock = MockPrompter::new();
        mock.expect_confirm()
            .returning(|_, _| Err(PromptError::Cancelled));
        let ctx = make_context(
            empty_config(PathBuf::from("/dotfiles")),
            Arc::new(WhichExecutor::default()),
            Arc::new(mock),
        );
        assert!(!ctx.confirm("Install tools?", true));
    }

    #[test]
    fn debug_format_includes_key_fields() {
        let ctx = make_linux_context(empty_config(PathBuf::from("/dotfiles")));
        let debug = format!("{ctx:?}");
        assert!(debug.contains("Context"));
        assert!(debug.contains("dry_run"));
        assert!(debug.contains("home"));
    }
}
