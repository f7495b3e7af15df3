//! Single-host dotfiles bootstrap.
//!
//! Fills in `<TOKEN>` placeholders of a dotfiles git repository, then mirrors
//! every tracked file into the home directory as a symbolic link, backing up
//! whatever was there before. Afterwards it installs optional tools and
//! offers to change the login shell. Behaviour is tuned by an optional
//! `conf/setup.toml` in the repository.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load and validate `conf/setup.toml`
//! - **[`materialize`]**: enumerate tracked files and link them into home
//! - **[`resources`]**: idempotent `check + apply` primitives (links, placeholders, tools, shell)
//! - **[`tasks`]**: named, ordered units of work wired to resources
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `uninstall`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod materialize;
pub mod platform;
pub mod prompt;
pub mod resources;
pub mod tasks;
