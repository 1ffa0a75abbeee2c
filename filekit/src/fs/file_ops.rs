//! Single-entry operations: create, rename, write, read, copy, chmod.
//!
//! Each call opens, works and closes within itself; no handle outlives it.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::permission::set_mode;
use super::probe::writable;
use super::{parent_dir, Filesystem};
use crate::error::{EntryKind, Error, Result};

impl Filesystem {
    /// Create a single directory level.
    ///
    /// If the directory already exists its permissions are reapplied and the
    /// call succeeds. `perm` defaults to the configured directory mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the parent does not exist,
    /// [`Error::PermissionDenied`] if the parent is not writable, or an I/O
    /// error if creation fails.
    pub fn mkdir(&self, path: &str, perm: Option<u32>) -> Result<()> {
        self.mkdir_at(&self.os_path(&self.localize(path)), perm)
    }

    pub(super) fn mkdir_at(&self, os: &Path, perm: Option<u32>) -> Result<()> {
        if os.is_dir() {
            if let Err(e) = self.chmod_at(os, perm) {
                log::warn!("could not reapply permissions to {}: {e}", self.display(os));
            }
            return Ok(());
        }

        let parent = parent_dir(os);
        if !parent.is_dir() {
            return Err(Error::PathNotFound {
                path: self.display(parent),
            });
        }
        if !writable(parent) {
            return Err(Error::PermissionDenied {
                path: self.display(parent),
            });
        }

        fs::create_dir(os).map_err(|e| Error::from_io(self.display(os), e))?;
        log::debug!("created directory {}", self.display(os));
        self.chmod_at(os, perm)
    }

    /// Rename or move an entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if `original` does not exist,
    /// [`Error::PermissionDenied`] if it is not writable, or an I/O error if
    /// the OS rename fails (for example across devices or into a missing
    /// directory).
    pub fn rename(&self, original: &str, new_name: &str) -> Result<()> {
        let from = self.localize(original);
        let to = self.localize(new_name);
        if !self.file_exists(&from) {
            return Err(Error::PathNotFound { path: from });
        }
        if !self.is_writable(&from) {
            return Err(Error::PermissionDenied { path: from });
        }

        fs::rename(self.os_path(&from), self.os_path(&to)).map_err(|e| Error::from_io(&to, e))?;
        log::debug!("renamed {from} to {to}");
        Ok(())
    }

    /// Rename or move an entry, creating the destination's parents first.
    ///
    /// # Errors
    ///
    /// Fails as [`Filesystem::rename`] does, or if the destination's parent
    /// directories cannot be created.
    pub fn rename_force(&self, original: &str, new_name: &str) -> Result<()> {
        let from = self.localize(original);
        if !self.file_exists(&from) {
            return Err(Error::PathNotFound { path: from });
        }
        if !self.is_writable(&from) {
            return Err(Error::PermissionDenied { path: from });
        }

        let parent = self.parent_of(new_name);
        if !self.is_dir(&parent) {
            self.mkdir_r(&parent, None)?;
        }
        self.rename(&from, new_name)
    }

    /// Write `content` to a file, replacing anything already there.
    ///
    /// Empty content leaves a zero-length file. `perm` defaults to the
    /// configured file mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the path is a directory,
    /// [`Error::PermissionDenied`] if the target is not writable, or an I/O
    /// error if writing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::Filesystem;
    ///
    /// let temp = tempfile::tempdir().unwrap();
    /// let path = temp.path().join("out.txt");
    /// let path = path.to_str().unwrap();
    ///
    /// let fs = Filesystem::new();
    /// fs.save_file(path, b"first", None).unwrap();
    /// fs.save_file(path, b"second", None).unwrap();
    /// assert_eq!(fs.read_file(path).unwrap(), b"second");
    /// ```
    pub fn save_file(&self, path: &str, content: &[u8], perm: Option<u32>) -> Result<()> {
        let target = self.resolve(path, None)?;
        if self.is_dir(&target) {
            return Err(Error::TypeMismatch {
                path: target,
                expected: EntryKind::File,
            });
        }
        if !self.is_writable(&target) {
            return Err(Error::PermissionDenied { path: target });
        }

        let os = self.os_path(&target);
        if content.is_empty() && self.is_file(&target) {
            fs::remove_file(&os).map_err(|e| Error::from_io(&target, e))?;
        }

        let mut file = File::create(&os).map_err(|e| Error::from_io(&target, e))?;
        file.write_all(content)
            .and_then(|()| file.flush())
            .map_err(|e| Error::from_io(&target, e))?;
        drop(file);
        log::debug!("wrote {} bytes to {target}", content.len());

        self.chmod(&target, perm)
    }

    /// Read the whole content of a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the file does not exist, or an I/O
    /// error if reading fails.
    pub fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let local = self.localize(path);
        fs::read(self.os_path(&local)).map_err(|e| Error::from_io(&local, e))
    }

    /// Copy a file, skipping the copy when the destination already matches.
    ///
    /// A destination with the same size and SHA-256 digest as the source is
    /// left untouched. Otherwise the source is copied and the destination
    /// receives `perm` (default: the configured file mode).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the source is missing,
    /// [`Error::TypeMismatch`] if it is not a file,
    /// [`Error::PermissionDenied`] if it is not readable,
    /// [`Error::Conflict`] if the destination is a directory, or an I/O
    /// error if copying fails.
    pub fn copy(&self, from: &str, to: &str, perm: Option<u32>) -> Result<()> {
        let src = self.os_path(&self.localize(from));
        let dest = self.os_path(&self.localize(to));
        self.copy_at(&src, &dest, perm)
    }

    pub(super) fn copy_at(&self, src: &Path, dest: &Path, perm: Option<u32>) -> Result<()> {
        if !src.is_file() {
            let path = self.display(src);
            if src.exists() {
                return Err(Error::TypeMismatch {
                    path,
                    expected: EntryKind::File,
                });
            }
            return Err(Error::PathNotFound { path });
        }
        if File::open(src).is_err() {
            return Err(Error::PermissionDenied {
                path: self.display(src),
            });
        }

        if dest.is_dir() {
            return Err(Error::Conflict {
                path: self.display(dest),
                reason: "destination is a directory".to_string(),
            });
        }

        if dest.is_file() && same_content(src, dest) {
            log::debug!(
                "{} already matches {}, skipping copy",
                self.display(dest),
                self.display(src)
            );
            return Ok(());
        }

        fs::copy(src, dest).map_err(|e| Error::from_io(self.display(dest), e))?;
        log::debug!("copied {} to {}", self.display(src), self.display(dest));
        self.chmod_at(dest, perm)
    }

    /// Change the permission mode of an entry.
    ///
    /// `perm` defaults to the configured mode for the entry's kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the entry does not exist, or an
    /// I/O error if the mode cannot be changed.
    pub fn chmod(&self, path: &str, perm: Option<u32>) -> Result<()> {
        self.chmod_at(&self.os_path(&self.localize(path)), perm)
    }

    pub(super) fn chmod_at(&self, os: &Path, perm: Option<u32>) -> Result<()> {
        let meta = fs::metadata(os).map_err(|e| Error::from_io(self.display(os), e))?;
        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let mode = perm.unwrap_or_else(|| self.permissions.for_kind(kind));

        set_mode(os, mode).map_err(|e| Error::from_io(self.display(os), e))?;
        log::trace!("set mode {mode:o} on {}", self.display(os));
        Ok(())
    }
}

/// Check whether two files have the same size and SHA-256 digest.
fn same_content(a: &Path, b: &Path) -> bool {
    let sizes_match = match (fs::metadata(a), fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.len() == mb.len(),
        _ => false,
    };
    if !sizes_match {
        return false;
    }
    match (file_digest(a), file_digest(b)) {
        (Ok(da), Ok(db)) => da == db,
        _ => false,
    }
}

fn file_digest(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hasher.finalize().to_vec())
}
