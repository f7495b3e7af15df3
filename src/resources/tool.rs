//! Optional tool installation resource.
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use super::package::PackageManager;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::config::tools::Tool;
use crate::exec::{Executor, split_command};

/// A tool that should be present on the host.
#[derive(Debug)]
pub struct ToolResource<'a> {
    tool: &'a Tool,
    home: PathBuf,
    manager: Option<PackageManager>,
    executor: &'a dyn Executor,
}

impl<'a> ToolResource<'a> {
    /// Create a new tool resource.
    #[must_use]
    pub fn new(
        tool: &'a Tool,
        home: &Path,
        manager: Option<PackageManager>,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            tool,
            home: home.to_path_buf(),
            manager,
            executor,
        }
    }

    fn is_present(&self) -> bool {
        let on_path = self
            .tool
            .binary
            .as_deref()
            .is_some_and(|binary| self.executor.which(binary));
        let under_home = self
            .tool
            .path
            .as_deref()
            .is_some_and(|path| self.home.join(path).exists());
        on_path || under_home
    }
}

impl Applicable for ToolResource<'_> {
    fn description(&self) -> String {
        self.tool.name.clone()
    }

    fn apply(&self) -> Result<ResourceChange> {
        if let Some((program, args)) = split_command(&self.tool.install) {
            self.executor.run_interactive(program, &args)?;
            return Ok(ResourceChange::Applied);
        }

        let Some(package) = self.tool.package.as_deref() else {
            return Ok(ResourceChange::Skipped {
                reason: "no install command configured".to_string(),
            });
        };
        let Some(manager) = self.manager else {
            bail!("no supported package manager found to install {package}");
        };
        manager.install(package, self.executor)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for ToolResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.is_present() {
            return Ok(ResourceState::Correct);
        }
        let missing: Vec<&str> = self
            .tool
            .requires
            .iter()
            .map(String::as_str)
            .filter(|cmd| !self.executor.which(cmd))
            .collect();
        if missing.is_empty() {
            Ok(ResourceState::Missing)
        } else {
            Ok(ResourceState::Invalid {
                reason: format!("requires {}", missing.join(", ")),
            })
        }
    }
}
