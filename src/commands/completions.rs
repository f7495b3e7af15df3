//! Command: print shell completions.
use std::io::Write;

use clap::CommandFactory as _;
use clap_complete::Shell;

use crate::cli::Cli;

/// Write completions for `shell` to `out`.
pub fn generate(shell: Shell, out: &mut dyn Write) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, out);
}

/// Print completions for `shell` to stdout.
pub fn run(shell: Shell) {
    generate(shell, &mut std::io::stdout());
}
