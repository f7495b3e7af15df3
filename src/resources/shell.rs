//! Login shell resource.
use anyhow::{Result, bail};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A resource for configuring the default login shell.
#[derive(Debug)]
pub struct DefaultShellResource<'a> {
    /// Target shell name (e.g., "zsh").
    target_shell: String,
    /// Login shell currently recorded in `$SHELL`.
    current_shell: String,
    /// Executor for running system commands.
    executor: &'a dyn Executor,
}

impl<'a> DefaultShellResource<'a> {
    /// Create a new default shell resource.
    #[must_use]
    pub const fn new(target_shell: String, current_shell: String, executor: &'a dyn Executor) -> Self {
        Self {
            target_shell,
            current_shell,
            executor,
        }
    }

    /// Create a resource comparing against the `$SHELL` environment variable.
    #[must_use]
    pub fn from_env(target_shell: String, executor: &'a dyn Executor) -> Self {
        Self::new(
            target_shell,
            std::env::var("SHELL").unwrap_or_default(),
            executor,
        )
    }
}

impl Applicable for DefaultShellResource<'_> {
    fn description(&self) -> String {
        format!("default shell → {}", self.target_shell)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let result = self.executor.run("which", &[&self.target_shell])?;
        let shell_path = result.stdout.trim();
        if shell_path.is_empty() {
            bail!("could not resolve the path of {}", self.target_shell);
        }
        // chsh asks for the user's password
        self.executor.run_interactive("chsh", &["-s", shell_path])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for DefaultShellResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let suffix = format!("/{}", self.target_shell);

        if self.current_shell.ends_with(&suffix) {
            Ok(ResourceState::Correct)
        } else if self.current_shell.is_empty() {
            Ok(ResourceState::Missing)
        } else {
            Ok(ResourceState::Incorrect {
                current: self.current_shell.clone(),
            })
        }
    }
}
