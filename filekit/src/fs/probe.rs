//! Read-only probes: entry kind, existence, access and timestamps.

use std::fs::{self, File};
use std::path::Path;

use super::permission::{format_mode, mode_of};
use super::{parent_dir, Filesystem};
use crate::error::{Error, Result};

impl Filesystem {
    /// Check whether `path` is a regular file, following symlinks.
    #[must_use]
    pub fn is_file(&self, path: &str) -> bool {
        self.os_path(&self.localize(path)).is_file()
    }

    /// Check whether `path` is a directory, following symlinks.
    #[must_use]
    pub fn is_dir(&self, path: &str) -> bool {
        self.os_path(&self.localize(path)).is_dir()
    }

    /// Check whether `path` itself is a symbolic link.
    #[must_use]
    pub fn is_link(&self, path: &str) -> bool {
        fs::symlink_metadata(self.os_path(&self.localize(path)))
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    /// Check whether `path` exists, following symlinks.
    ///
    /// A dangling symlink does not exist by this definition.
    #[must_use]
    pub fn file_exists(&self, path: &str) -> bool {
        self.os_path(&self.localize(path)).exists()
    }

    /// Check whether `path` can be opened for reading.
    ///
    /// Files are opened and directories are listed to find out.
    #[must_use]
    pub fn is_readable(&self, path: &str) -> bool {
        let os = self.os_path(&self.localize(path));
        match fs::metadata(&os) {
            Ok(meta) if meta.is_dir() => fs::read_dir(&os).is_ok(),
            Ok(_) => File::open(&os).is_ok(),
            Err(_) => false,
        }
    }

    /// Check whether `path` can be written.
    ///
    /// For anything that is not an existing regular file, the answer is the
    /// writability of its parent directory, which tells whether the entry
    /// could be created, replaced or removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::Filesystem;
    ///
    /// let temp = tempfile::tempdir().unwrap();
    /// let fs = Filesystem::new();
    /// let candidate = temp.path().join("not-yet-created.txt");
    /// assert!(fs.is_writable(candidate.to_str().unwrap()));
    /// ```
    #[must_use]
    pub fn is_writable(&self, path: &str) -> bool {
        let local = self.localize(path);
        if self.is_file(&local) {
            writable(&self.os_path(&local))
        } else {
            writable(&self.os_path(&self.parent_of(&local)))
        }
    }

    /// Compare the modification times of two entries.
    ///
    /// Returns `None` when neither exists or both have the same mtime,
    /// `Some(true)` when only `a` exists or `a` is newer, and `Some(false)`
    /// when only `b` exists or `b` is newer.
    #[must_use]
    pub fn is_newer_a_than_b(&self, a: &str, b: &str) -> Option<bool> {
        let mtime_a = self.modified(a);
        let mtime_b = self.modified(b);
        match (mtime_a, mtime_b) {
            (None, None) => None,
            (Some(_), None) => Some(true),
            (None, Some(_)) => Some(false),
            (Some(ta), Some(tb)) if ta == tb => None,
            (Some(ta), Some(tb)) => Some(ta > tb),
        }
    }

    /// The permission bits of `path` as three octal digits, such as `755`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the entry does not exist.
    pub fn get_permission(&self, path: &str) -> Result<String> {
        let local = self.localize(path);
        let meta = fs::metadata(self.os_path(&local)).map_err(|e| Error::from_io(&local, e))?;
        Ok(format_mode(mode_of(&meta)))
    }

    /// Check existence without following a final symlink.
    pub(crate) fn lexists(&self, local: &str) -> bool {
        fs::symlink_metadata(self.os_path(local)).is_ok()
    }

    fn modified(&self, path: &str) -> Option<std::time::SystemTime> {
        fs::metadata(self.os_path(&self.localize(path)))
            .and_then(|meta| meta.modified())
            .ok()
    }
}

/// Check whether the entry at `os` could be written, replaced or removed.
///
/// A regular file answers for itself, anything else for its parent.
pub(super) fn replaceable(os: &Path) -> bool {
    if os.is_file() {
        writable(os)
    } else {
        writable(parent_dir(os))
    }
}

/// Ask the OS whether the calling process may write `os`.
#[cfg(unix)]
pub(super) fn writable(os: &Path) -> bool {
    use rustix::fs::{access, Access};

    access(os, Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
pub(super) fn writable(os: &Path) -> bool {
    fs::metadata(os)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}
