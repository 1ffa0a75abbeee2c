//! Recursive tree operations: create, delete, copy, chmod, compare, sync.
//!
//! Deletions never follow symlinks: a link is removed as an entry of its own
//! and whatever it points to is left alone. The best-effort operations
//! (`copy_r`, `chmod_r`, `compare_and_cleanup`) attempt every entry, log each
//! failure and report the count as [`Error::Incomplete`].

use std::fs;
use std::path::Path;

use super::probe::replaceable;
use super::{parent_dir, Filesystem};
use crate::error::{EntryKind, Error, Result};
use crate::path::is_drive_specifier;

/// Options for [`Filesystem::remove_empty_dir`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveEmptyDirOptions {
    /// How many levels below the starting directory to visit.
    ///
    /// `None` means unlimited; zero or less means the starting directory
    /// only.
    pub depth: Option<i32>,
}

impl RemoveEmptyDirOptions {
    /// Limit the pass to `depth` levels below the starting directory.
    #[must_use]
    pub const fn with_depth(mut self, depth: i32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// The options for the next level down, or `None` to stop descending.
    fn descend(self) -> Option<Self> {
        match self.depth {
            None => Some(self),
            Some(depth) if depth <= 0 => None,
            Some(depth) => Some(Self {
                depth: Some(depth - 1),
            }),
        }
    }
}

/// Options for [`Filesystem::compare_dir`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// Compare the bytes of files present on both sides.
    pub compare_filecontent: bool,
    /// Treat a directory on one side and nothing on the other as a
    /// difference, and require identical listings.
    pub compare_emptydir: bool,
}

impl CompareOptions {
    /// Also compare file contents.
    #[must_use]
    pub const fn with_filecontent(mut self, enabled: bool) -> Self {
        self.compare_filecontent = enabled;
        self
    }

    /// Also require matching (possibly empty) directories.
    #[must_use]
    pub const fn with_emptydir(mut self, enabled: bool) -> Self {
        self.compare_emptydir = enabled;
        self
    }
}

impl Filesystem {
    /// Create a directory and every missing ancestor.
    ///
    /// The path is resolved first, then each missing level is created in
    /// order with `perm` (default: the configured directory mode).
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if a file occupies the path, or the
    /// error of the first level that could not be created.
    pub fn mkdir_r(&self, path: &str, perm: Option<u32>) -> Result<()> {
        let local = self.localize(path);
        if self.is_dir(&local) {
            return Ok(());
        }
        if self.is_file(&local) {
            return Err(Error::TypeMismatch {
                path: local,
                expected: EntryKind::Directory,
            });
        }

        let sep = self.separator();
        let resolved = self.resolve(&local, None)?;
        let mut target = String::with_capacity(resolved.len());
        for (idx, segment) in resolved.split(sep).enumerate() {
            if matches!(segment, "" | "." | "..") {
                continue;
            }
            if !(idx == 0 && self.is_windows() && is_drive_specifier(segment)) {
                target.push(sep);
            }
            target.push_str(segment);
            if !self.is_dir(&target) {
                self.mkdir(&target, perm)?;
            }
        }
        Ok(())
    }

    /// Delete a file, a symlink or a whole directory tree.
    ///
    /// Directory contents are removed depth-first; a failure on one entry is
    /// logged and the rest are still attempted. Nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if nothing exists at the path,
    /// [`Error::PermissionDenied`] if it is not writable, or the error of the
    /// final removal.
    pub fn rm(&self, path: &str) -> Result<()> {
        let local = self.localize(path);
        if !self.lexists(&local) {
            return Err(Error::PathNotFound { path: local });
        }
        if !self.is_writable(&local) {
            return Err(Error::PermissionDenied { path: local });
        }
        self.remove_tree(&self.os_path(&local))
    }

    /// Delete an empty directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if nothing exists at the path,
    /// [`Error::PermissionDenied`] if it is not writable,
    /// [`Error::TypeMismatch`] if it is a file or a symlink, or an I/O error
    /// if the directory is not empty.
    pub fn rmdir(&self, path: &str) -> Result<()> {
        let local = self.localize(path);
        self.check_removable_dir(&local)?;
        self.remove_dir_at(&self.os_path(&local))
    }

    /// Delete a directory tree.
    ///
    /// Files and symlinks inside are removed with [`Filesystem::rm`] and
    /// failures there are logged. Subdirectories are removed recursively and
    /// the first one that fails aborts the whole operation.
    ///
    /// # Errors
    ///
    /// Fails as [`Filesystem::rmdir`] does, or with the error of the first
    /// subdirectory that could not be removed.
    pub fn rmdir_r(&self, path: &str) -> Result<()> {
        let local = self.localize(path);
        self.check_removable_dir(&local)?;
        self.remove_dir_tree(&self.os_path(&local))
    }

    /// Copy a file or a directory tree.
    ///
    /// Missing destination directories are created. A source directory whose
    /// destination name is taken by a file is skipped. Copied files receive
    /// `perm` (default: the configured file mode).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the source does not exist, or
    /// [`Error::Incomplete`] if any entry could not be copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::Filesystem;
    ///
    /// let temp = tempfile::tempdir().unwrap();
    /// let root = temp.path().to_str().unwrap();
    /// let fs = Filesystem::new();
    /// fs.mkdir_r(&format!("{root}/src/nested"), None).unwrap();
    /// fs.save_file(&format!("{root}/src/nested/a.txt"), b"a", None).unwrap();
    ///
    /// fs.copy_r(&format!("{root}/src"), &format!("{root}/dest"), None).unwrap();
    /// assert!(fs.is_file(&format!("{root}/dest/nested/a.txt")));
    /// ```
    pub fn copy_r(&self, from: &str, to: &str, perm: Option<u32>) -> Result<()> {
        let src = self.localize(from);
        let dest = self.localize(to);
        if !self.file_exists(&src) {
            return Err(Error::PathNotFound { path: src });
        }

        let mut failures = 0;
        self.copy_tree(&self.os_path(&src), &self.os_path(&dest), perm, &mut failures);
        finish(src, failures)
    }

    fn copy_tree(&self, src: &Path, dest: &Path, perm: Option<u32>, failures: &mut usize) {
        if src.is_file() {
            let copied = self
                .create_dirs(parent_dir(dest))
                .and_then(|()| self.copy_at(src, dest, perm));
            self.record(copied, dest, failures);
            return;
        }
        if !src.is_dir() {
            return;
        }

        if !dest.is_dir() {
            self.record(self.create_dirs(dest), dest, failures);
        }
        let names = match self.entry_names(src) {
            Ok(names) => names,
            Err(e) => {
                self.record(Err(e), src, failures);
                return;
            }
        };
        for name in names {
            let src_child = src.join(&name);
            let dest_child = dest.join(&name);
            if src_child.is_dir() && dest_child.is_file() {
                log::debug!(
                    "{} is a file, not copying directory {}",
                    self.display(&dest_child),
                    self.display(&src_child)
                );
                continue;
            }
            self.copy_tree(&src_child, &dest_child, perm, failures);
        }
    }

    /// Apply permissions to a whole tree.
    ///
    /// Files receive `perm_file` and directories `perm_dir`. If only
    /// `perm_file` is given it is used for directories too; missing modes
    /// fall back to the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the path does not exist, or
    /// [`Error::Incomplete`] if any entry could not be changed.
    pub fn chmod_r(&self, path: &str, perm_file: Option<u32>, perm_dir: Option<u32>) -> Result<()> {
        let local = self.localize(path);
        if !self.file_exists(&local) {
            return Err(Error::PathNotFound { path: local });
        }

        let perm_dir = perm_dir.or(perm_file);
        let mut failures = 0;
        self.chmod_tree(&self.os_path(&local), perm_file, perm_dir, &mut failures);
        finish(local, failures)
    }

    fn chmod_tree(
        &self,
        os: &Path,
        perm_file: Option<u32>,
        perm_dir: Option<u32>,
        failures: &mut usize,
    ) {
        if os.is_file() {
            self.record(self.chmod_at(os, perm_file), os, failures);
        } else if os.is_dir() {
            self.record(self.chmod_at(os, perm_dir), os, failures);
            match self.entry_names(os) {
                Ok(names) => {
                    for name in names {
                        self.chmod_tree(&os.join(name), perm_file, perm_dir, failures);
                    }
                }
                Err(e) => self.record(Err(e), os, failures),
            }
        }
    }

    /// Remove directories that contain nothing.
    ///
    /// Subdirectories are visited first (down to `options.depth`), so a
    /// chain of directories that only contain each other collapses in one
    /// call. Symlinks are neither followed nor deleted, and a symlink keeps
    /// its directory alive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the path does not exist,
    /// [`Error::TypeMismatch`] if it is not a real directory,
    /// [`Error::PermissionDenied`] if it is not writable, or an I/O error if
    /// the removal fails.
    pub fn remove_empty_dir(&self, path: &str, options: &RemoveEmptyDirOptions) -> Result<()> {
        let local = self.localize(path);
        if !self.lexists(&local) {
            return Err(Error::PathNotFound { path: local });
        }
        if self.is_link(&local) || !self.is_dir(&local) {
            return Err(Error::TypeMismatch {
                path: local,
                expected: EntryKind::Directory,
            });
        }
        if !self.is_writable(&local) {
            return Err(Error::PermissionDenied { path: local });
        }
        self.prune_empty(&self.os_path(&local), options)
    }

    fn prune_empty(&self, os: &Path, options: &RemoveEmptyDirOptions) -> Result<()> {
        let child_options = options.descend();
        let mut alive = false;
        for name in self.entry_names(os)? {
            let child = os.join(name);
            if let Some(child_options) = child_options {
                if is_real_dir(&child) {
                    let pruned = if replaceable(&child) {
                        self.prune_empty(&child, &child_options)
                    } else {
                        Err(Error::PermissionDenied {
                            path: self.display(&child),
                        })
                    };
                    if let Err(e) = pruned {
                        log::debug!("kept {}: {e}", self.display(&child));
                    }
                }
            }
            if fs::symlink_metadata(&child).is_ok() {
                alive = true;
            }
        }

        if !alive {
            fs::remove_dir(os).map_err(|e| Error::from_io(self.display(os), e))?;
            log::debug!("removed empty directory {}", self.display(os));
        }
        Ok(())
    }

    /// Compare two entries recursively.
    ///
    /// A file on one side must be a file on the other. With
    /// `compare_emptydir` a directory must be a directory on the other side
    /// too and both listings must match; without it only the files inside
    /// are compared. With `compare_filecontent` file bytes must be equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::{CompareOptions, Filesystem};
    ///
    /// let temp = tempfile::tempdir().unwrap();
    /// let root = temp.path().to_str().unwrap();
    /// let fs = Filesystem::new();
    /// fs.mkdir_r(&format!("{root}/a/empty"), None).unwrap();
    /// fs.mkdir_r(&format!("{root}/b"), None).unwrap();
    ///
    /// let loose = CompareOptions::default();
    /// assert!(fs.compare_dir(&format!("{root}/a"), &format!("{root}/b"), &loose));
    ///
    /// let strict = CompareOptions::default().with_emptydir(true);
    /// assert!(!fs.compare_dir(&format!("{root}/a"), &format!("{root}/b"), &strict));
    /// ```
    #[must_use]
    pub fn compare_dir(&self, dir_a: &str, dir_b: &str, options: &CompareOptions) -> bool {
        let a = self.os_path(&self.localize(dir_a));
        let b = self.os_path(&self.localize(dir_b));
        self.compare_tree(&a, &b, options)
    }

    fn compare_tree(&self, a: &Path, b: &Path, options: &CompareOptions) -> bool {
        let a_file = a.is_file();
        let b_file = b.is_file();
        if a_file != b_file {
            return false;
        }
        let a_dir = a.is_dir();
        let b_dir = b.is_dir();
        if a_dir != b_dir && options.compare_emptydir {
            return false;
        }

        if a_file {
            if !options.compare_filecontent {
                return true;
            }
            return match (fs::read(a), fs::read(b)) {
                (Ok(content_a), Ok(content_b)) => content_a == content_b,
                _ => false,
            };
        }

        if a_dir || b_dir {
            let list_a = self.entry_names(a).unwrap_or_default();
            let list_b = self.entry_names(b).unwrap_or_default();
            if options.compare_emptydir && list_a != list_b {
                return false;
            }
            let names = list_a
                .iter()
                .chain(list_b.iter().filter(|name| !list_a.contains(*name)));
            for name in names {
                if !self.compare_tree(&a.join(name), &b.join(name), options) {
                    return false;
                }
            }
        }
        true
    }

    /// Delete everything under `target` that has no counterpart under
    /// `comparison`.
    ///
    /// Only `target` is ever modified. Symlinked directories in `target` are
    /// deleted or kept as a whole, never entered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] if any entry could not be deleted or
    /// listed.
    pub fn compare_and_cleanup(&self, target: &str, comparison: &str) -> Result<()> {
        let target = self.localize(target);
        let comparison = self.localize(comparison);
        let mut failures = 0;
        self.cleanup_tree(
            &self.os_path(&target),
            &self.os_path(&comparison),
            &mut failures,
        );
        finish(target, failures)
    }

    fn cleanup_tree(&self, target: &Path, comparison: &Path, failures: &mut usize) {
        if fs::symlink_metadata(target).is_err() {
            return;
        }
        if !comparison.exists() {
            self.record(self.remove_child(target), target, failures);
            return;
        }
        if !is_real_dir(target) {
            return;
        }

        match self.entry_names(target) {
            Ok(names) => {
                for name in names {
                    self.cleanup_tree(&target.join(&name), &comparison.join(&name), failures);
                }
            }
            Err(e) => self.record(Err(e), target, failures),
        }
    }

    /// Make `to` mirror `from`: copy everything over, then prune extras.
    ///
    /// Both steps always run.
    ///
    /// # Errors
    ///
    /// Returns the copy error if copying failed, otherwise the cleanup error.
    pub fn sync_dir(&self, from: &str, to: &str) -> Result<()> {
        let copied = self.copy_r(from, to, None);
        let cleaned = self.compare_and_cleanup(to, from);
        copied.and(cleaned)
    }

    /// Preconditions shared by `rmdir` and `rmdir_r`.
    fn check_removable_dir(&self, local: &str) -> Result<()> {
        if !self.lexists(local) {
            return Err(Error::PathNotFound {
                path: local.to_string(),
            });
        }
        if !self.is_writable(local) {
            return Err(Error::PermissionDenied {
                path: local.to_string(),
            });
        }
        if self.is_link(local) || !self.is_dir(local) {
            return Err(Error::TypeMismatch {
                path: local.to_string(),
                expected: EntryKind::Directory,
            });
        }
        Ok(())
    }

    /// Remove an entry found while walking a tree, as `rm` would.
    fn remove_child(&self, os: &Path) -> Result<()> {
        if !replaceable(os) {
            return Err(Error::PermissionDenied {
                path: self.display(os),
            });
        }
        self.remove_tree(os)
    }

    /// Unlink a file or a symlink, or empty and remove a real directory.
    fn remove_tree(&self, os: &Path) -> Result<()> {
        let meta = fs::symlink_metadata(os).map_err(|e| Error::from_io(self.display(os), e))?;
        if !meta.is_dir() {
            remove_entry(os).map_err(|e| Error::from_io(self.display(os), e))?;
            log::debug!("removed {}", self.display(os));
            return Ok(());
        }

        for name in self.entry_names(os)? {
            let child = os.join(name);
            if let Err(e) = self.remove_child(&child) {
                log::warn!("could not remove {}: {e}", self.display(&child));
            }
        }
        self.remove_dir_at(os)
    }

    fn remove_dir_tree(&self, os: &Path) -> Result<()> {
        for name in self.entry_names(os)? {
            let child = os.join(name);
            if !is_real_dir(&child) {
                if let Err(e) = self.remove_child(&child) {
                    log::warn!("could not remove {}: {e}", self.display(&child));
                }
            } else if replaceable(&child) {
                self.remove_dir_tree(&child)?;
            } else {
                return Err(Error::PermissionDenied {
                    path: self.display(&child),
                });
            }
        }
        self.remove_dir_at(os)
    }

    fn remove_dir_at(&self, os: &Path) -> Result<()> {
        fs::remove_dir(os).map_err(|e| Error::from_io(self.display(os), e))?;
        log::debug!("removed directory {}", self.display(os));
        Ok(())
    }

    /// Create a directory and its missing ancestors with the default mode.
    fn create_dirs(&self, os: &Path) -> Result<()> {
        if os.as_os_str().is_empty() || os.is_dir() {
            return Ok(());
        }
        if os.exists() {
            return Err(Error::TypeMismatch {
                path: self.display(os),
                expected: EntryKind::Directory,
            });
        }
        if let Some(parent) = os.parent() {
            self.create_dirs(parent)?;
        }
        self.mkdir_at(os, None)
    }

    /// Count a failed step of a best-effort operation.
    fn record(&self, result: Result<()>, os: &Path, failures: &mut usize) {
        if let Err(e) = result {
            log::warn!("{}: {e}", self.display(os));
            *failures += match e {
                Error::Incomplete { failures, .. } => failures,
                _ => 1,
            };
        }
    }
}

/// Check for a directory without following a final symlink.
fn is_real_dir(os: &Path) -> bool {
    fs::symlink_metadata(os)
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Unlink a file or a symlink without following it.
fn remove_entry(os: &Path) -> std::io::Result<()> {
    let removed = fs::remove_file(os);
    #[cfg(windows)]
    let removed = removed.or_else(|_| fs::remove_dir(os));
    removed
}

/// Turn a failure count into the result of a best-effort operation.
fn finish(path: String, failures: usize) -> Result<()> {
    if failures == 0 {
        Ok(())
    } else {
        Err(Error::Incomplete { path, failures })
    }
}
