//! Log file location, ANSI stripping and timestamps.
use std::fs;
use std::path::PathBuf;

/// Remove ANSI escape sequences so the log file holds plain text.
///
/// A CSI sequence (`ESC [`) runs until its final byte in `@..=~`; any
/// other escape drops only the `ESC` itself.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next_if_eq(&'[').is_some() {
            for ch in chars.by_ref() {
                if ('@'..='~').contains(&ch) {
                    break;
                }
            }
        }
    }
    out
}

/// `$XDG_CACHE_HOME/dotfiles-setup/<command>.log`, falling back to
/// `$HOME/.cache`. Creates the directory; `None` if that fails.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
        .unwrap_or_else(|| PathBuf::from(".cache"));
    let dir = cache.join("dotfiles-setup");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

#[cfg(test)]
#[allow(unsafe_code)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::TEST_ENV_MUTEX;

    #[test]
    fn strip_ansi_removes_sgr_and_csi() {
        assert_eq!(strip_ansi("\x1b[1;31merror:\x1b[0m boom"), "error: boom");
        assert_eq!(strip_ansi("\x1b[2Kcleared"), "cleared");
        assert_eq!(strip_ansi("plain"), "plain");
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn strip_ansi_drops_lone_escape() {
        assert_eq!(strip_ansi("\x1bMtext"), "Mtext");
    }

    #[test]
    fn log_file_lives_under_xdg_cache_home() {
        let _lock = TEST_ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let tmp = tempfile::tempdir().unwrap();
        // SAFETY: serialized by TEST_ENV_MUTEX and restored before unlock.
        unsafe { std::env::set_var("XDG_CACHE_HOME", tmp.path()) };
        let path = log_file_path("uninstall");
        unsafe { std::env::remove_var("XDG_CACHE_HOME") };
        assert_eq!(
            path,
            Some(tmp.path().join("dotfiles-setup").join("uninstall.log"))
        );
        assert!(tmp.path().join("dotfiles-setup").is_dir());
    }

    #[test]
    fn utc_now_uses_format() {
        let date = utc_now("%Y-%m-%d");
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('-').count(), 2);
    }
}
