//! Version-controlled path enumeration and the exclusion set.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::TrackedError;

/// A path tracked by git, relative to the source root and `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackedFile {
    /// Relative path.
    pub relative_path: String,
}

impl TrackedFile {
    /// Create a tracked file entry.
    #[must_use]
    pub fn new(relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
        }
    }

    /// First path segment (`.config` for `.config/nvim/init.lua`).
    #[must_use]
    pub fn first_segment(&self) -> &str {
        self.relative_path
            .split('/')
            .next()
            .unwrap_or(&self.relative_path)
    }
}

/// Top-level names that are never linked into the target root.
///
/// A path is excluded when the whole path or its first segment is a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// Build a set from names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `file` must not be linked.
    #[must_use]
    pub fn is_excluded(&self, file: &TrackedFile) -> bool {
        self.names.contains(&file.relative_path) || self.names.contains(file.first_segment())
    }
}

/// List every path in the git index of the repository containing `root`,
/// relative to `root`.
///
/// Submodules appear as a single entry (their gitlink); the materializer
/// skips them because the source is a directory.
///
/// # Errors
///
/// Returns an error if `root` is not inside a non-bare git repository or the
/// index cannot be read.
pub fn tracked_files(root: &Path) -> Result<Vec<TrackedFile>, TrackedError> {
    let repository = Repository::discover(root).map_err(|source| TrackedError::NotARepository {
        path: root.to_path_buf(),
        source,
    })?;
    let workdir = repository
        .workdir()
        .ok_or_else(|| TrackedError::Bare(repository.path().to_path_buf()))?;
    let prefix = index_prefix(workdir, root);

    let index = repository.index()?;
    let mut files = Vec::with_capacity(index.len());
    for entry in index.iter() {
        let path = String::from_utf8_lossy(&entry.path);
        let relative = match &prefix {
            Some(prefix) => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.to_string(),
                None => continue,
            },
            None => path.into_owned(),
        };
        files.push(TrackedFile::new(relative));
    }
    Ok(files)
}

/// The `/`-terminated index prefix of `root` inside `workdir`, or `None`
/// when `root` is the working directory itself.
fn index_prefix(workdir: &Path, root: &Path) -> Option<String> {
    let canonical = |p: &Path| dunce::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    let relative: PathBuf = canonical(root)
        .strip_prefix(canonical(workdir))
        .ok()?
        .to_path_buf();
    if relative.as_os_str().is_empty() {
        return None;
    }
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(format!("{}/", segments.join("/")))
}
