//! Domain-specific error types for the setup engine.
//!
//! Internal modules return typed errors (e.g., [`LinkError`], [`ConfigError`])
//! while tasks and command handlers convert them to [`anyhow::Error`] via the
//! standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SetupError
//! ├── Config(ConfigError)    : setup.toml reading and parsing
//! ├── Tracked(TrackedError)  : git index enumeration
//! ├── Link(LinkError)        : per-path materializer failures
//! └── Prompt(PromptError)    : interactive input
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the setup engine.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracked file enumeration error.
    #[error("Tracked file error: {0}")]
    Tracked(#[from] TrackedError),

    /// Linking error for a single path.
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// Interactive prompt error.
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}

/// Errors that arise from loading `conf/setup.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected schema.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors that arise while listing version-controlled paths.
#[derive(Error, Debug)]
pub enum TrackedError {
    /// The source root is not inside a git repository.
    #[error("not a git repository: {path}")]
    NotARepository {
        /// Directory that was searched for a repository.
        path: PathBuf,
        /// Underlying git error.
        source: git2::Error,
    },

    /// The repository has no working directory (bare repository).
    #[error("repository at {0} is bare")]
    Bare(PathBuf),

    /// The git index could not be read.
    #[error("reading git index: {0}")]
    Index(#[from] git2::Error),
}

/// A failure to materialize one tracked path.
///
/// Each variant carries the relative path so the aggregated report can name
/// the file without extra bookkeeping.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The parent directory of the link target could not be created.
    #[error("{path}: create parent directory {parent}: {source}")]
    CreateParent {
        /// Relative tracked path.
        path: String,
        /// Directory that could not be created.
        parent: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The existing target could not be moved into the backup directory.
    #[error("{path}: move {from} to backup {to}: {source}")]
    Backup {
        /// Relative tracked path.
        path: String,
        /// Existing target that was being moved.
        from: PathBuf,
        /// Backup destination.
        to: PathBuf,
        /// Underlying I/O error (e.g. cross-device rename, permission denied).
        source: std::io::Error,
    },

    /// The symlink could not be created or swapped into place.
    #[error("{path}: link {target} -> {source_path}: {source}")]
    Link {
        /// Relative tracked path.
        path: String,
        /// Link location.
        target: PathBuf,
        /// Link destination (the file in the source tree).
        source_path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The current state of the target could not be inspected.
    #[error("{path}: inspect {target}: {source}")]
    Inspect {
        /// Relative tracked path.
        path: String,
        /// Target that could not be inspected.
        target: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl LinkError {
    /// The relative tracked path this failure belongs to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::CreateParent { path, .. }
            | Self::Backup { path, .. }
            | Self::Link { path, .. }
            | Self::Inspect { path, .. } => path,
        }
    }
}

/// Errors from interactive prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user closed standard input (EOF) instead of answering.
    #[error("prompt cancelled by user")]
    Cancelled,

    /// The prompt required a value but the run is non-interactive.
    #[error("not in interactive mode")]
    NotInteractive,

    /// Reading from or writing to the terminal failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
