//! System package manager detection and installation.
use anyhow::Result;

use crate::exec::Executor;
use crate::platform::{Os, Platform};

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Debian and Ubuntu (apt-get).
    Apt,
    /// Fedora and RHEL (dnf).
    Dnf,
    /// Arch Linux (pacman).
    Pacman,
    /// macOS Homebrew.
    Brew,
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apt => write!(f, "apt-get"),
            Self::Dnf => write!(f, "dnf"),
            Self::Pacman => write!(f, "pacman"),
            Self::Brew => write!(f, "brew"),
        }
    }
}

impl PackageManager {
    /// Find the first supported package manager available on this host.
    #[must_use]
    pub fn detect(platform: &Platform, executor: &dyn Executor) -> Option<Self> {
        let candidates: &[Self] = match platform.os {
            Os::MacOs => &[Self::Brew],
            Os::Linux => &[Self::Apt, Self::Dnf, Self::Pacman, Self::Brew],
            Os::Other => &[],
        };
        candidates
            .iter()
            .copied()
            .find(|pm| executor.which(&pm.to_string()))
    }

    /// The command line installing `package`, including `sudo` where the
    /// manager needs root.
    #[must_use]
    pub fn install_command(self, package: &str) -> (&'static str, Vec<&str>) {
        match self {
            Self::Apt => ("sudo", vec!["apt-get", "install", "-y", package]),
            Self::Dnf => ("sudo", vec!["dnf", "install", "-y", package]),
            Self::Pacman => ("sudo", vec!["pacman", "-S", "--needed", "--noconfirm", package]),
            Self::Brew => ("brew", vec!["install", package]),
        }
    }

    /// Install `package`, attached to the terminal so `sudo` can prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the package manager exits non-zero.
    pub fn install(self, package: &str, executor: &dyn Executor) -> Result<()> {
        let (program, args) = self.install_command(package);
        executor.run_interactive(program, &args)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    #[test]
    fn detect_prefers_apt_on_linux() {
        let exec = MockExecutor::default().with_available(&["apt-get", "brew"]);
        let platform = Platform::new(Os::Linux, false);
        assert_eq!(PackageManager::detect(&platform, &exec), Some(PackageManager::Apt));
    }

    #[test]
    fn detect_only_brew_on_macos() {
        let exec = MockExecutor::default().with_available(&["apt-get"]);
        let platform = Platform::new(Os::MacOs, false);
        assert_eq!(PackageManager::detect(&platform, &exec), None);
    }

    #[test]
    fn detect_nothing_on_other_platforms() {
        let exec = MockExecutor::default().with_available(&["brew"]);
        let platform = Platform::new(Os::Other, false);
        assert_eq!(PackageManager::detect(&platform, &exec), None);
    }

    #[test]
    fn brew_installs_without_sudo() {
        let (program, args) = PackageManager::Brew.install_command("zsh");
        assert_eq!(program, "brew");
        assert_eq!(args, vec!["install", "zsh"]);
    }

    #[test]
    fn install_runs_command() {
        let exec = MockExecutor::ok("");
        PackageManager::Pacman.install("zsh", &exec).unwrap();
        assert_eq!(
            exec.calls(),
            vec!["sudo pacman -S --needed --noconfirm zsh"]
        );
    }
}
