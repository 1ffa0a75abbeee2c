//! Path canonicalization functions.
//!
//! Canonicalization asks the OS for the real location of an existing entry,
//! following symlinks. On Windows the result is kept in its familiar
//! `C:\...` form instead of the verbatim `\\?\C:\...` form.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Canonicalize an existing path by following symlinks.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist (`PathNotFound`)
/// - Permission is denied (`PermissionDenied`)
/// - An I/O error occurs
///
/// # Examples
///
/// ```no_run
/// use filekit::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::from_io(path, e))
}

/// Canonicalize the current working directory.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined or no
/// longer exists.
pub fn current_dir() -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| Error::from_io(".", e))?;
    canonicalize(&cwd)
}

/// Check whether a canonical path is a filesystem root.
///
/// # Examples
///
/// ```
/// use filekit::path::canonicalize::is_root;
/// use std::path::Path;
///
/// # #[cfg(unix)]
/// assert!(is_root(Path::new("/")));
/// assert!(!is_root(Path::new("/tmp")));
/// ```
#[must_use]
pub fn is_root(path: &Path) -> bool {
    path.has_root() && path.parent().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_canonicalize_existing_path() {
        let temp = tempdir().unwrap();
        let canonical = canonicalize(temp.path()).unwrap();
        assert!(canonical.is_absolute());
        assert!(canonical.exists());
    }

    #[test]
    fn test_canonicalize_nonexistent_path() {
        let result = canonicalize(Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_canonicalize_removes_dot_segments() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        let dotted = temp.path().join("a").join("..").join(".").join("a");
        let canonical = canonicalize(&dotted).unwrap();
        assert_eq!(canonical, canonicalize(&temp.path().join("a")).unwrap());
    }

    #[test]
    #[cfg(unix)]
    fn test_canonicalize_follows_symlink() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("link");
        fs::create_dir(&target).unwrap();
        symlink(&target, &link).unwrap();

        let canonical = canonicalize(&link).unwrap();
        assert_eq!(canonical, canonicalize(&target).unwrap());
    }

    #[test]
    fn test_current_dir_is_absolute() {
        let cwd = current_dir().unwrap();
        assert!(cwd.is_absolute());
    }

    #[test]
    fn test_is_root() {
        let temp = tempdir().unwrap();
        assert!(!is_root(temp.path()));
        #[cfg(unix)]
        assert!(is_root(Path::new("/")));
    }
}
