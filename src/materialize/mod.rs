//! Linking tracked dotfiles into the target root.
//!
//! [`materialize`] turns every non-excluded tracked path into a symlink under
//! the target root pointing back at the source tree. Existing entries that are
//! not symlinks are moved into a timestamped backup directory first. Each path
//! is handled independently: a failure is recorded in the report and the
//! remaining paths are still processed.
pub mod tracked;

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::LinkError;
use crate::resources::fs::{create_symlink, ensure_parent_dir, link_points_to, move_path, replace_symlink};

pub use tracked::{ExclusionSet, TrackedFile, tracked_files};

/// Format of the per-run backup directory name.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Inputs of a materialize run.
#[derive(Debug, Clone)]
pub struct MaterializeConfig {
    /// Root of the dotfiles checkout.
    pub source_root: PathBuf,
    /// Directory the links are created in (the home directory).
    pub target_root: PathBuf,
    /// Paths never linked.
    pub exclusions: ExclusionSet,
    /// Start of the run; names the backup directory.
    pub run_timestamp: DateTime<Local>,
    /// Backup directory name relative to `target_root`.
    pub backup_dir: String,
}

impl MaterializeConfig {
    /// Directory receiving displaced files for this run.
    #[must_use]
    pub fn backup_root(&self) -> PathBuf {
        self.target_root
            .join(&self.backup_dir)
            .join(self.run_timestamp.format(BACKUP_TIMESTAMP_FORMAT).to_string())
    }
}

/// A file or directory moved out of the way of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    /// Relative tracked path.
    pub path: String,
    /// Where the original entry now lives.
    pub backup: PathBuf,
}

/// Why a tracked path was not linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The source is a directory (submodule boundary).
    Directory,
    /// The tracked path no longer exists in the working tree.
    SourceMissing,
    /// The target resolves into the source tree through a linked parent
    /// directory, so linking would overwrite the source itself.
    InsideSource,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory => write!(f, "source is a directory"),
            Self::SourceMissing => write!(f, "source does not exist"),
            Self::InsideSource => write!(f, "target resolves into the source tree"),
        }
    }
}

/// A tracked path left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    /// Relative tracked path.
    pub path: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a materialize run.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// Paths whose target is (or in a dry run would be) a link to the source.
    pub linked: Vec<String>,
    /// Subset of `linked` that already pointed at the source.
    pub unchanged: Vec<String>,
    /// Entries moved to the backup directory.
    pub backed_up: Vec<BackupRecord>,
    /// Paths not linked on purpose.
    pub skipped: Vec<SkippedPath>,
    /// Per-path failures.
    pub failures: Vec<LinkError>,
}

impl MaterializeReport {
    /// Number of links created or replaced.
    #[must_use]
    pub const fn changed(&self) -> usize {
        self.linked.len().saturating_sub(self.unchanged.len())
    }

    /// Whether every path succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// What happened to one path.
enum Outcome {
    Linked,
    Unchanged,
    Skipped(SkipReason),
}

/// Link every non-excluded tracked path into the target root.
///
/// With `dry_run` the report describes what would happen and nothing on disk
/// is touched.
#[must_use]
pub fn materialize(
    config: &MaterializeConfig,
    tracked: &[TrackedFile],
    dry_run: bool,
) -> MaterializeReport {
    let mut report = MaterializeReport::default();
    let mut seen = HashSet::new();
    let backup_root = config.backup_root();
    let canonical_source =
        dunce::canonicalize(&config.source_root).unwrap_or_else(|_| config.source_root.clone());

    for file in tracked {
        if config.exclusions.is_excluded(file) || !seen.insert(file.relative_path.as_str()) {
            continue;
        }
        let path = file.relative_path.clone();
        let step = LinkStep {
            path: &path,
            source: config.source_root.join(&path),
            target: config.target_root.join(&path),
            backup: backup_root.join(&path),
        };

        match step.run(&canonical_source, dry_run, &mut report.backed_up) {
            Ok(Outcome::Linked) => report.linked.push(path),
            Ok(Outcome::Unchanged) => {
                report.unchanged.push(path.clone());
                report.linked.push(path);
            }
            Ok(Outcome::Skipped(reason)) => report.skipped.push(SkippedPath { path, reason }),
            Err(e) => report.failures.push(e),
        }
    }

    report
}

/// Paths involved in linking one tracked file.
struct LinkStep<'a> {
    path: &'a str,
    source: PathBuf,
    target: PathBuf,
    backup: PathBuf,
}

impl LinkStep<'_> {
    /// Link one path. A backup is pushed onto `backed_up` as soon as the move
    /// succeeds, so it is reported even if linking then fails.
    fn run(
        &self,
        canonical_source: &Path,
        dry_run: bool,
        backed_up: &mut Vec<BackupRecord>,
    ) -> Result<Outcome, LinkError> {
        match self.source.symlink_metadata() {
            Ok(meta) if meta.is_dir() => return Ok(Outcome::Skipped(SkipReason::Directory)),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Outcome::Skipped(SkipReason::SourceMissing));
            }
            Err(source) => return Err(self.inspect_error(&self.source, source)),
        }

        if !dry_run {
            ensure_parent_dir(&self.target).map_err(|source| LinkError::CreateParent {
                path: self.path.to_string(),
                parent: self.target.parent().map(Path::to_path_buf).unwrap_or_default(),
                source,
            })?;
        }
        if self.parent_inside(canonical_source) {
            return Ok(Outcome::Skipped(SkipReason::InsideSource));
        }

        let existing = match self.target.symlink_metadata() {
            Ok(meta) => Some(meta),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(self.inspect_error(&self.target, source)),
        };

        match existing {
            None => {
                if !dry_run {
                    create_symlink(&self.source, &self.target).map_err(|e| self.link_error(e))?;
                }
                Ok(Outcome::Linked)
            }
            Some(meta) if meta.file_type().is_symlink() => {
                if link_points_to(&self.target, &self.source) {
                    return Ok(Outcome::Unchanged);
                }
                if !dry_run {
                    replace_symlink(&self.source, &self.target).map_err(|e| self.link_error(e))?;
                }
                Ok(Outcome::Linked)
            }
            Some(_) => {
                if dry_run {
                    backed_up.push(self.backup_record());
                } else {
                    self.back_up_then_link(backed_up, create_symlink)?;
                }
                Ok(Outcome::Linked)
            }
        }
    }

    fn back_up_then_link(
        &self,
        backed_up: &mut Vec<BackupRecord>,
        link: impl FnOnce(&Path, &Path) -> io::Result<()>,
    ) -> Result<(), LinkError> {
        move_path(&self.target, &self.backup).map_err(|source| LinkError::Backup {
            path: self.path.to_string(),
            from: self.target.clone(),
            to: self.backup.clone(),
            source,
        })?;
        backed_up.push(self.backup_record());
        link(&self.source, &self.target).map_err(|e| self.link_error(e))
    }

    fn backup_record(&self) -> BackupRecord {
        BackupRecord {
            path: self.path.to_string(),
            backup: self.backup.clone(),
        }
    }

    /// Whether the target's parent resolves to a directory inside the source
    /// tree (e.g. an old directory-level link).
    fn parent_inside(&self, canonical_source: &Path) -> bool {
        self.target
            .parent()
            .and_then(|parent| dunce::canonicalize(parent).ok())
            .is_some_and(|parent| parent.starts_with(canonical_source))
    }

    fn link_error(&self, source: io::Error) -> LinkError {
        LinkError::Link {
            path: self.path.to_string(),
            target: self.target.clone(),
            source_path: self.source.clone(),
            source,
        }
    }

    fn inspect_error(&self, target: &Path, source: io::Error) -> LinkError {
        LinkError::Inspect {
            path: self.path.to_string(),
            target: target.to_path_buf(),
            source,
        }
    }
}
