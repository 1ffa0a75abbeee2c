//! Default permission modes and the platform glue for applying them.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::validator::parse_mode;
use crate::config::FsConfig;
use crate::error::{EntryKind, Result};

/// The mode applied when nothing else is configured.
pub const DEFAULT_MODE: u32 = 0o775;

/// The permission modes applied to newly created entries.
///
/// # Examples
///
/// ```
/// use filekit::fs::PermissionSpec;
///
/// let spec = PermissionSpec::default();
/// assert_eq!(spec.file(), 0o775);
/// assert_eq!(spec.dir(), 0o775);
///
/// let spec = PermissionSpec::new(0o644, 0o755);
/// assert_eq!(spec.file(), 0o644);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionSpec {
    file: u32,
    dir: u32,
}

impl Default for PermissionSpec {
    fn default() -> Self {
        Self {
            file: DEFAULT_MODE,
            dir: DEFAULT_MODE,
        }
    }
}

impl PermissionSpec {
    /// Create a spec with explicit file and directory modes.
    #[must_use]
    pub const fn new(file: u32, dir: u32) -> Self {
        Self { file, dir }
    }

    /// Build a spec from configuration, falling back to [`DEFAULT_MODE`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if a configured mode is not a valid octal
    /// permission string.
    pub fn from_config(config: &FsConfig) -> Result<Self> {
        let file = config
            .file_default_permission
            .as_deref()
            .map(|mode| parse_mode("file_default_permission", mode))
            .transpose()?
            .unwrap_or(DEFAULT_MODE);
        let dir = config
            .dir_default_permission
            .as_deref()
            .map(|mode| parse_mode("dir_default_permission", mode))
            .transpose()?
            .unwrap_or(DEFAULT_MODE);
        Ok(Self { file, dir })
    }

    /// The default mode for regular files.
    #[must_use]
    pub const fn file(&self) -> u32 {
        self.file
    }

    /// The default mode for directories.
    #[must_use]
    pub const fn dir(&self) -> u32 {
        self.dir
    }

    /// The default mode for an entry of the given kind.
    #[must_use]
    pub const fn for_kind(&self, kind: EntryKind) -> u32 {
        match kind {
            EntryKind::File => self.file,
            EntryKind::Directory => self.dir,
        }
    }
}

/// Apply a permission mode to an existing entry.
#[cfg(unix)]
pub(crate) fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

/// Apply a permission mode to an existing entry.
///
/// Only the owner write bit is honoured, as the read-only attribute.
#[cfg(not(unix))]
pub(crate) fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(mode & 0o200 == 0);
    fs::set_permissions(path, permissions)
}

/// Read the permission bits of an existing entry.
#[cfg(unix)]
pub(crate) fn mode_of(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    metadata.permissions().mode() & 0o7777
}

/// Read the permission bits of an existing entry.
///
/// Synthesized from the read-only attribute.
#[cfg(not(unix))]
pub(crate) fn mode_of(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o555
    } else {
        0o777
    }
}

/// Render the last three octal digits of a mode, as in `755`.
#[must_use]
pub fn format_mode(mode: u32) -> String {
    format!("{:03o}", mode & 0o777)
}
