#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `uninstall` command.

mod common;

use common::TestContextBuilder;
use dotfiles_setup::commands::run_tasks_to_completion;
use dotfiles_setup::tasks::{self, Task};

/// Snapshot of the uninstall task list.
#[test]
fn uninstall_task_names() {
    let all_tasks = tasks::all_uninstall_tasks();
    let task_names: Vec<&str> = all_tasks.iter().map(|t| t.name()).collect();
    insta::assert_snapshot!(task_names.join("\n"), @"Remove dotfile links");
}

#[test]
#[cfg(unix)]
fn removes_links_and_keeps_backups_and_foreign_files() {
    let env = TestContextBuilder::new()
        .with_tracked_file(".zshrc", "export EDITOR=vim\n")
        .with_tracked_file(".vimrc", "syntax on\n")
        .with_home_file(".zshrc", "old\n")
        .build();

    let install: Vec<Box<dyn Task>> =
        tasks::filter_tasks(tasks::all_install_tasks(), &["links".to_string()], &[]);
    let (ctx, log) = env.context(false);
    run_tasks_to_completion(install.iter().map(Box::as_ref), &ctx, &log).unwrap();

    // A link the user made themselves must survive.
    let foreign = env.home_file(".vimrc");
    std::fs::remove_file(&foreign).unwrap();
    std::os::unix::fs::symlink("/etc/hostname", &foreign).unwrap();

    let uninstall = tasks::all_uninstall_tasks();
    let (ctx, log) = env.context(false);
    run_tasks_to_completion(uninstall.iter().map(Box::as_ref), &ctx, &log).unwrap();

    assert!(env.home_file(".zshrc").symlink_metadata().is_err());
    assert!(foreign.symlink_metadata().unwrap().file_type().is_symlink());
    let runs = env.backup_runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(std::fs::read_to_string(runs[0].join(".zshrc")).unwrap(), "old\n");
}

#[test]
fn uninstall_without_links_is_a_no_op() {
    let env = TestContextBuilder::new()
        .with_tracked_file(".zshrc", "export EDITOR=vim\n")
        .build();
    let uninstall = tasks::all_uninstall_tasks();
    let (ctx, log) = env.context(false);
    run_tasks_to_completion(uninstall.iter().map(Box::as_ref), &ctx, &log).unwrap();
    assert!(!log.summary().has_failures());
}
