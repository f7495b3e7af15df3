// Shared helpers for integration tests.
//
// Provides a temporary git repository standing in for the dotfiles tree, a
// separate temporary home directory, and a fluent builder so each test can
// set up an isolated environment without repeating git boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dotfiles_setup::config::Config;
use dotfiles_setup::exec::SystemExecutor;
use dotfiles_setup::logging::Logger;
use dotfiles_setup::platform::{Os, Platform};
use dotfiles_setup::prompt::AssumeYes;
use dotfiles_setup::tasks::Context;

/// A dotfiles repository and a home directory, both deleted on drop.
pub struct IntegrationTestContext {
    /// Temporary git working tree holding the dotfiles.
    pub repo: tempfile::TempDir,
    /// Temporary directory links are created in.
    pub home: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Path to the repository root.
    pub fn root_path(&self) -> &Path {
        self.repo.path()
    }

    /// Path to the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// `relative` resolved under the home directory.
    pub fn home_file(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    /// Backup run directories created under the default backup location.
    pub fn backup_runs(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.home.path().join(".dotfiles_backup"))
            .map(|entries| entries.map(|e| e.expect("read backup entry").path()).collect())
            .unwrap_or_default()
    }

    /// Build a non-interactive task context on a non-CI Linux platform.
    pub fn context(&self, dry_run: bool) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::new("test"));
        let config = Config::load(self.repo.path()).expect("load config");
        let ctx = Context::new(
            Arc::new(config),
            Arc::new(Platform::new(Os::Linux, false)),
            Arc::clone(&log) as _,
            Arc::new(AssumeYes),
            Arc::new(SystemExecutor),
            Some(self.home.path().to_path_buf()),
            dry_run,
        )
        .expect("build context");
        (ctx, log)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
    repo: git2::Repository,
}

impl TestContextBuilder {
    /// Begin building with an empty repository and an empty home.
    pub fn new() -> Self {
        let repo_dir = tempfile::tempdir().expect("create repo dir");
        let home = tempfile::tempdir().expect("create home dir");
        let repo = git2::Repository::init(repo_dir.path()).expect("init repo");
        Self {
            ctx: IntegrationTestContext {
                repo: repo_dir,
                home,
            },
            repo,
        }
    }

    /// Write `content` to `relative` in the repository and stage it.
    pub fn with_tracked_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.repo.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, content).expect("write tracked file");
        let mut index = self.repo.index().expect("open index");
        index.add_path(Path::new(relative)).expect("stage file");
        index.write().expect("write index");
        self
    }

    /// Write `conf/setup.toml` (excluded from linking by default).
    pub fn with_config(self, content: &str) -> Self {
        let conf = self.ctx.repo.path().join("conf");
        std::fs::create_dir_all(&conf).expect("create conf dir");
        std::fs::write(conf.join("setup.toml"), content).expect("write setup.toml");
        self
    }

    /// Write `content` to `relative` under the home directory.
    pub fn with_home_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.home.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, content).expect("write home file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
