//! Placeholder token substitution resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A `<TOKEN>` marker inside a file that should be replaced by a value.
#[derive(Debug, Clone)]
pub struct PlaceholderResource {
    /// File containing the marker.
    pub path: PathBuf,
    /// Marker text including angle brackets.
    pub marker: String,
    value: Option<String>,
}

impl PlaceholderResource {
    /// Create a resource with no value yet; state can be checked but applying
    /// skips until [`with_value`](Self::with_value) supplies one.
    #[must_use]
    pub const fn new(path: PathBuf, marker: String) -> Self {
        Self {
            path,
            marker,
            value: None,
        }
    }

    /// Attach the replacement value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl Applicable for PlaceholderResource {
    fn description(&self) -> String {
        format!("{} in {}", self.marker, self.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let value = match self.value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => {
                return Ok(ResourceChange::Skipped {
                    reason: "no value provided".to_string(),
                });
            }
        };

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        if !content.contains(&self.marker) {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        let replaced = content.replace(&self.marker, value);
        std::fs::write(&self.path, replaced)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for PlaceholderResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.path.is_file() {
            return Ok(ResourceState::Invalid {
                reason: format!("file does not exist: {}", self.path.display()),
            });
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        if content.contains(&self.marker) {
            Ok(ResourceState::Missing)
        } else {
            Ok(ResourceState::Correct)
        }
    }
}
