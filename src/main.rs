//! `dotfiles-setup` binary entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use dotfiles_setup::cli::{self, Command};
use dotfiles_setup::commands;
use dotfiles_setup::logging::{self, Logger};
use dotfiles_setup::prompt::{AssumeYes, Prompter, StdinPrompter};

/// Exit status used when the run is interrupted with Ctrl-C.
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.command_or_default();

    let name = match &command {
        Command::Completions { shell } => {
            commands::completions::run(*shell);
            return Ok(());
        }
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
        Command::Install(_) => "install",
        Command::Uninstall => "uninstall",
    };

    logging::init_subscriber(args.verbose, name);
    ctrlc::set_handler(|| {
        tracing::warn!("interrupted; re-run dotfiles-setup to complete the setup");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })?;

    let log = Arc::new(Logger::new(name));
    let prompter: Arc<dyn Prompter> = if args.global.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinPrompter)
    };

    match command {
        Command::Install(opts) => commands::install::run(&args.global, &opts, &log, prompter),
        Command::Uninstall => commands::uninstall::run(&args.global, &log, prompter),
        Command::Completions { .. } | Command::Version => Ok(()),
    }
}
