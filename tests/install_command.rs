#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `install` command.
//!
//! These tests run the install tasks against a temporary git repository and
//! home directory, covering linking, backups, re-runs, dry runs and
//! placeholder filling.

mod common;

use std::collections::HashSet;

use common::TestContextBuilder;
use dotfiles_setup::commands::run_tasks_to_completion;
use dotfiles_setup::logging::TaskStatus;
use dotfiles_setup::tasks::{self, Task};

fn only(id: &str) -> Vec<Box<dyn Task>> {
    tasks::filter_tasks(tasks::all_install_tasks(), &[id.to_string()], &[])
}

// ---------------------------------------------------------------------------
// Task list
// ---------------------------------------------------------------------------

/// Snapshot of all install task ids and names in their declared order.
#[test]
fn install_task_names() {
    let all_tasks = tasks::all_install_tasks();
    let names: Vec<String> = all_tasks
        .iter()
        .map(|t| format!("{} ({})", t.name(), t.id()))
        .collect();
    insta::assert_snapshot!(names.join("\n"), @r"
    Fill placeholders (placeholders)
    Link dotfiles (links)
    Install tools (tools)
    Configure default shell (shell)
    ");
}

/// No two install tasks may share the same id.
#[test]
fn install_task_ids_are_unique() {
    let tasks = tasks::all_install_tasks();
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id()).collect();
    assert_eq!(ids.len(), tasks.len());
}

// ---------------------------------------------------------------------------
// Linking
// ---------------------------------------------------------------------------

#[test]
#[cfg(unix)]
fn links_every_tracked_file_except_exclusions() {
    let env = TestContextBuilder::new()
        .with_tracked_file(".zshrc", "export EDITOR=vim\n")
        .with_tracked_file(".config/nvim/init.vim", "set number\n")
        .with_tracked_file("README.md", "# dotfiles\n")
        .build();
    let (ctx, log) = env.context(false);

    let selected = only("links");
    run_tasks_to_completion(selected.iter().map(Box::as_ref), &ctx, &log).unwrap();

    let zshrc = env.home_file(".zshrc");
    assert!(zshrc.symlink_metadata().unwrap().file_type().is_symlink());
    assert_eq!(std::fs::read_link(&zshrc).unwrap(), env.root_path().join(".zshrc"));

    let init = env.home_file(".config/nvim/init.vim");
    assert!(init.symlink_metadata().unwrap().file_type().is_symlink());
    assert!(env.home_file(".config/nvim").is_dir());

    assert!(!env.home_file("README.md").exists());
    assert_eq!(log.task_entries()[0].status, TaskStatus::Ok);
}

#[test]
#[cfg(unix)]
fn existing_files_are_backed_up_before_linking() {
    let env = TestContextBuilder::new()
        .with_tracked_file(".vimrc", "syntax on\n")
        .with_home_file(".vimrc", "old settings\n")
        .build();
    let (ctx, log) = env.context(false);

    let selected = only("links");
    run_tasks_to_completion(selected.iter().map(Box::as_ref), &ctx, &log).unwrap();

    let runs = env.backup_runs();
    assert_eq!(runs.len(), 1);
    let saved = std::fs::read_to_string(runs[0].join(".vimrc")).unwrap();
    assert_eq!(saved, "old settings\n");
    assert_eq!(
        std::fs::read_to_string(env.home_file(".vimrc")).unwrap(),
        "syntax on\n"
    );
}

#[test]
#[cfg(unix)]
fn second_run_changes_nothing() {
    let env = TestContextBuilder::new()
        .with_tracked_file(".tmux.conf", "set -g mouse on\n")
        .with_home_file(".tmux.conf", "old\n")
        .build();

    let (ctx, log) = env.context(false);
    let selected = only("links");
    run_tasks_to_completion(selected.iter().map(Box::as_ref), &ctx, &log).unwrap();
    assert_eq!(env.backup_runs().len(), 1);

    let (ctx, log) = env.context(false);
    run_tasks_to_completion(selected.iter().map(Box::as_ref), &ctx, &log).unwrap();
    assert_eq!(env.backup_runs().len(), 1, "a re-run must not back up links");
    assert!(
        env.home_file(".tmux.conf")
            .symlink_metadata()
            .unwrap()
            .file_type()
            .is_symlink()
    );
}

#[test]
fn dry_run_leaves_home_untouched() {
    let env = TestContextBuilder::new()
        .with_tracked_file(".zshrc", "export EDITOR=vim\n")
        .with_tracked_file(".config/git/ignore", "*.swp\n")
        .with_home_file(".zshrc", "mine\n")
        .build();
    let (ctx, log) = env.context(true);

    let selected = only("links");
    run_tasks_to_completion(selected.iter().map(Box::as_ref), &ctx, &log).unwrap();

    assert_eq!(std::fs::read_to_string(env.home_file(".zshrc")).unwrap(), "mine\n");
    assert!(!env.home_file(".config").exists());
    assert!(env.backup_runs().is_empty());
    assert_eq!(log.task_entries()[0].status, TaskStatus::DryRun);
}

#[test]
fn custom_exclusions_replace_defaults() {
    let env = TestContextBuilder::new()
        .with_config("[link]\nexclude = [\"conf\", \"scripts\"]\n")
        .with_tracked_file("scripts/bootstrap.sh", "#!/bin/sh\n")
        .with_tracked_file("README.md", "# dotfiles\n")
        .build();
    let (ctx, log) = env.context(false);

    let selected = only("links");
    run_tasks_to_completion(selected.iter().map(Box::as_ref), &ctx, &log).unwrap();

    assert!(!env.home_file("scripts").exists());
    assert!(env.home_file("README.md").symlink_metadata().is_ok());
}

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

#[test]
#[cfg(unix)]
fn placeholder_filled_from_default_command() {
    let env = TestContextBuilder::new()
        .with_config(
            "[[placeholder]]\nfile = \".gitconfig\"\ntoken = \"GIT_EMAIL\"\ndefault_command = [\"echo\", \"me@example.com\"]\n",
        )
        .with_tracked_file(".gitconfig", "[user]\n\temail = <GIT_EMAIL>\n")
        .build();
    let (ctx, log) = env.context(false);

    let selected = only("placeholders");
    run_tasks_to_completion(selected.iter().map(Box::as_ref), &ctx, &log).unwrap();

    let content = std::fs::read_to_string(env.root_path().join(".gitconfig")).unwrap();
    assert_eq!(content, "[user]\n\temail = me@example.com\n");
}

#[test]
fn unanswerable_placeholder_is_left_unset_without_failing() {
    let env = TestContextBuilder::new()
        .with_config("[[placeholder]]\nfile = \".npmrc\"\ntoken = \"NPM_TOKEN\"\nsecret = true\n")
        .with_tracked_file(".npmrc", "//registry.npmjs.org/:_authToken=<NPM_TOKEN>\n")
        .build();
    let (ctx, log) = env.context(false);

    let selected = only("placeholders");
    run_tasks_to_completion(selected.iter().map(Box::as_ref), &ctx, &log).unwrap();

    let content = std::fs::read_to_string(env.root_path().join(".npmrc")).unwrap();
    assert!(content.contains("<NPM_TOKEN>"));
    assert!(!log.summary().has_failures());
}
