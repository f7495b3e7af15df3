//! Home directory link resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::fs::{ensure_parent_dir, entry_exists, link_points_to, remove_symlink, replace_symlink};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A symlink in the home directory pointing back into the dotfiles tree.
#[derive(Debug, Clone)]
pub struct HomeLink {
    /// The file in the source tree (what the symlink points to).
    pub source: PathBuf,
    /// The path under the home directory where the symlink lives.
    pub target: PathBuf,
}

impl HomeLink {
    /// Create a new link resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Applicable for HomeLink {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    /// Point the target at the source. Regular files are never replaced here;
    /// the materializer moves them to the backup directory first.
    fn apply(&self) -> Result<ResourceChange> {
        if entry_exists(&self.target) && !super::fs::is_symlink(&self.target) {
            return Ok(ResourceChange::Skipped {
                reason: "target is not a symlink".to_string(),
            });
        }
        ensure_parent_dir(&self.target)
            .with_context(|| format!("create parent of {}", self.target.display()))?;
        replace_symlink(&self.source, &self.target)
            .with_context(|| format!("link {}", self.description()))?;
        Ok(ResourceChange::Applied)
    }

    /// Remove the link, but only when it still points at our source.
    fn remove(&self) -> Result<ResourceChange> {
        if !link_points_to(&self.target, &self.source) {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        remove_symlink(&self.target)
            .with_context(|| format!("remove link {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for HomeLink {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }

        match std::fs::read_link(&self.target) {
            Ok(existing) if super::fs::paths_equal(&existing, &self.source) => {
                Ok(ResourceState::Correct)
            }
            Ok(existing) => Ok(ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            }),
            Err(_) if self.target.is_dir() => Ok(ResourceState::Incorrect {
                current: "target is a directory".to_string(),
            }),
            Err(_) if entry_exists(&self.target) => Ok(ResourceState::Incorrect {
                current: "target is a regular file".to_string(),
            }),
            Err(_) => Ok(ResourceState::Missing),
        }
    }
}
