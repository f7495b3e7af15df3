//! Host platform detection.
use std::fmt;

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Any Linux distribution.
    Linux,
    /// macOS.
    MacOs,
    /// Anything else (Windows, BSDs); optional steps that need `chsh` are skipped.
    Other,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
    /// Whether the run happens inside a CI environment (`CI` is set).
    pub is_ci: bool,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            is_ci: std::env::var_os("CI").is_some(),
        }
    }

    /// Create a platform with explicit values.
    #[must_use]
    pub const fn new(os: Os, is_ci: bool) -> Self {
        Self { os, is_ci }
    }

    /// Whether the host is a Unix-like system with `chsh`.
    #[must_use]
    pub const fn supports_chsh(&self) -> bool {
        matches!(self.os, Os::Linux | Os::MacOs)
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "linux") {
            Os::Linux
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            Os::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_display() {
        assert_eq!(Os::Linux.to_string(), "linux");
        assert_eq!(Os::MacOs.to_string(), "macos");
        assert_eq!(Os::Other.to_string(), "other");
    }

    #[test]
    fn chsh_only_on_unix_like() {
        assert!(Platform::new(Os::Linux, false).supports_chsh());
        assert!(Platform::new(Os::MacOs, false).supports_chsh());
        assert!(!Platform::new(Os::Other, false).supports_chsh());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn detect_linux() {
        assert_eq!(Platform::detect().os, Os::Linux);
    }
}
