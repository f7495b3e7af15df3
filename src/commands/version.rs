//! Command: print version information.

/// Version reported by `version` and the install banner.
///
/// `DOTFILES_SETUP_VERSION` is set by `build.rs` from `git describe` when
/// available.
#[must_use]
pub fn version_string() -> &'static str {
    option_env!("DOTFILES_SETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("dotfiles-setup {}", version_string());
}
