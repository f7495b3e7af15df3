//! Command-line argument definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the dotfiles bootstrap.
#[derive(Parser, Debug)]
#[command(
    name = "dotfiles-setup",
    about = "Link dotfiles into home, fill placeholders, install tools and set the login shell",
    version
)]
pub struct Cli {
    /// Subcommand to run; `install` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to run, defaulting to a plain `install`.
    #[must_use]
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Install(InstallOpts::default()))
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Answer every question with its default
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Override dotfiles root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Override the directory links are created in (defaults to $HOME)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Link dotfiles and configure the user environment
    Install(InstallOpts),
    /// Remove links that point into the dotfiles repository
    Uninstall,
    /// Print shell completions to stdout
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Skip specific tasks (placeholders, links, tools, shell)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_install() {
        let cli = Cli::parse_from(["dotfiles-setup"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.command_or_default(), Command::Install(opts) if opts.skip.is_empty()));
    }

    #[test]
    fn parse_install_dry_run_short() {
        let cli = Cli::parse_from(["dotfiles-setup", "-d", "install"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_global_flags_before_or_after_subcommand() {
        let cli = Cli::parse_from(["dotfiles-setup", "install", "-y", "--home", "/tmp/h"]);
        assert!(cli.global.yes);
        assert_eq!(cli.global.home, Some(PathBuf::from("/tmp/h")));
    }

    #[test]
    fn parse_install_skip_tasks() {
        let cli = Cli::parse_from(["dotfiles-setup", "install", "--skip", "tools,shell"]);
        let Some(Command::Install(opts)) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(opts.skip, vec!["tools", "shell"]);
    }

    #[test]
    fn parse_install_only_tasks() {
        let cli = Cli::parse_from(["dotfiles-setup", "install", "--only", "links"]);
        let Some(Command::Install(opts)) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(opts.only, vec!["links"]);
    }

    #[test]
    fn parse_uninstall_and_version() {
        let cli = Cli::parse_from(["dotfiles-setup", "uninstall"]);
        assert!(matches!(cli.command, Some(Command::Uninstall)));
        let cli = Cli::parse_from(["dotfiles-setup", "version"]);
        assert!(matches!(cli.command, Some(Command::Version)));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["dotfiles-setup", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Command::Completions {
                shell: clap_complete::Shell::Zsh
            })
        ));
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["dotfiles-setup", "--root", "/tmp/dotfiles", "install"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/dotfiles")));
    }

    #[test]
    fn verbose_flag() {
        let cli = Cli::parse_from(["dotfiles-setup", "-v"]);
        assert!(cli.verbose);
    }
}
