//! Idempotent resource primitives (check + apply pattern).
pub mod fs;
pub mod link;
pub mod package;
pub mod placeholder;
pub mod shell;
pub mod tool;

use anyhow::Result;

/// Minimal interface for resources that can be described, applied, and removed.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// a failing external command, or missing input.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// Default implementation returns an error; override in resources
    /// that support removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be removed, or if removal is not supported
    /// for this resource type.
    fn remove(&self) -> Result<ResourceChange> {
        anyhow::bail!(
            "operation 'remove' is not supported for resource '{}'",
            self.description()
        )
    }
}

/// State of a resource (link, placeholder, tool, login shell).
///
/// # Examples
///
/// ```
/// use dotfiles_setup::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "/bin/bash".into() };
/// let skip = ResourceState::Invalid { reason: "curl not found".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist or is not present.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// The current value of the resource.
        current: String,
    },
    /// Resource cannot be applied (missing file, missing prerequisite).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use dotfiles_setup::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let skipped = ResourceChange::Skipped { reason: "no value provided".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
    /// Resource was skipped (empty answer, declined).
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

/// Unified interface for resources that can be checked and applied.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource state cannot be determined due to I/O failures,
    /// permission issues, or other system errors.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the current state cannot be determined.
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

/// Shared test helpers for resource unit tests.
#[cfg(test)]
pub mod test_helpers {
    use crate::exec::{ExecResult, Executor};
    use std::collections::{HashSet, VecDeque};
    use std::sync::Mutex;

    /// A configurable mock executor for resource unit tests.
    ///
    /// Maintains a queue of `(success, stdout)` responses consumed in FIFO
    /// order. When the queue is empty any call returns a failed response.
    /// Every call is recorded as `"program arg1 arg2"` for later inspection.
    #[derive(Debug, Default)]
    pub struct MockExecutor {
        responses: Mutex<VecDeque<(bool, String)>>,
        available: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockExecutor {
        /// Create a mock with a single successful response.
        #[must_use]
        pub fn ok(stdout: &str) -> Self {
            Self::with_responses(vec![(true, stdout.to_string())])
        }

        /// Create a mock from an ordered list of `(success, stdout)` pairs.
        #[must_use]
        pub fn with_responses(responses: Vec<(bool, String)>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Self::default()
            }
        }

        /// Programs reported as present by [`Executor::which`].
        #[must_use]
        pub fn with_available(mut self, programs: &[&str]) -> Self {
            self.available = programs.iter().map(ToString::to_string).collect();
            self
        }

        /// Commands issued so far.
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.calls
                .lock()
                .map(|c| c.clone())
                .unwrap_or_default()
        }

        fn next(&self, program: &str, args: &[&str]) -> (bool, String) {
            if let Ok(mut calls) = self.calls.lock() {
                let mut line = program.to_string();
                for arg in args {
                    line.push(' ');
                    line.push_str(arg);
                }
                calls.push(line);
            }
            self.responses.lock().map_or_else(
                |_| (false, "mutex poisoned".to_string()),
                |mut guard| {
                    guard
                        .pop_front()
                        .unwrap_or_else(|| (false, "unexpected call".to_string()))
                },
            )
        }
    }

    impl Executor for MockExecutor {
        fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            let (success, stdout) = self.next(program, args);
            if success {
                Ok(ExecResult {
                    stdout,
                    stderr: String::new(),
                    success: true,
                    code: Some(0),
                })
            } else {
                anyhow::bail!("mock command failed: {stdout}")
            }
        }

        fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            let (success, stdout) = self.next(program, args);
            Ok(ExecResult {
                stdout,
                stderr: String::new(),
                success,
                code: Some(i32::from(!success)),
            })
        }

        fn run_interactive(&self, program: &str, args: &[&str]) -> anyhow::Result<()> {
            self.run(program, args).map(|_| ())
        }

        fn which(&self, program: &str) -> bool {
            self.available.contains(program)
        }
    }
}
