//! File-system helpers shared by the link resource and the materializer.
//!
//! These return [`std::io::Result`] so callers can wrap failures in their own
//! typed errors with the relative path attached.
use std::io;
use std::path::{Path, PathBuf};

/// Suffix of the sibling name used while swapping a link into place.
const TMP_SUFFIX: &str = "dotfiles-setup-tmp";

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Whether `path` is itself a symlink (broken links included).
#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Whether anything exists at `path` without following a final symlink.
#[must_use]
pub fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Whether `link` is a symlink whose destination equals `source`.
#[must_use]
pub fn link_points_to(link: &Path, source: &Path) -> bool {
    std::fs::read_link(link).is_ok_and(|existing| paths_equal(&existing, source))
}

/// Compare two paths for equality, handling UNC prefix normalization on Windows.
#[must_use]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    let normalize = |p: &Path| -> PathBuf {
        #[cfg(windows)]
        {
            let s = p.to_string_lossy();
            if let Some(stripped) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(stripped);
            }
        }
        p.to_path_buf()
    };

    normalize(a) == normalize(b)
}

/// Create a symlink at `link` pointing to `source`.
///
/// # Errors
///
/// Returns an error if the link cannot be created (existing entry,
/// permission denied, unsupported filesystem).
pub fn create_symlink(source: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, link)
    }

    #[cfg(windows)]
    {
        if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, link)
        } else {
            std::os::windows::fs::symlink_file(source, link)
        }
    }
}

/// Point `link` at `source`, replacing whatever link is there.
///
/// The new link is created under a sibling temporary name and renamed over
/// `link`, so `link` never disappears for observers. The temporary entry is
/// removed again if the rename fails.
///
/// # Errors
///
/// Returns an error if the temporary link cannot be created or renamed.
pub fn replace_symlink(source: &Path, link: &Path) -> io::Result<()> {
    let tmp = sibling_tmp_path(link);
    if entry_exists(&tmp) {
        std::fs::remove_file(&tmp)?;
    }
    create_symlink(source, &tmp)?;
    if let Err(e) = std::fs::rename(&tmp, link) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// Remove a symlink without touching its destination.
///
/// On Windows, directory symlinks must be removed with `remove_dir`.
///
/// # Errors
///
/// Returns an error if the link cannot be removed.
pub fn remove_symlink(path: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        let meta = std::fs::symlink_metadata(path)?;
        if meta.file_attributes() & 0x10 != 0 {
            return std::fs::remove_dir(path);
        }
    }
    std::fs::remove_file(path)
}

/// Move `from` to `to`, creating the parents of `to` first.
///
/// This is a plain rename; moving across filesystems fails.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the rename fails.
pub fn move_path(from: &Path, to: &Path) -> io::Result<()> {
    ensure_parent_dir(to)?;
    std::fs::rename(from, to)
}

fn sibling_tmp_path(link: &Path) -> PathBuf {
    let name = link
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    link.with_file_name(format!(".{name}.{TMP_SUFFIX}-{}", std::process::id()))
}
