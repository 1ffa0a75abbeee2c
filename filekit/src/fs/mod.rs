//! Filesystem operations on path strings.
//!
//! [`Filesystem`] is the entry point for everything that touches the disk:
//! probes, single-entry operations, directory listings and recursive tree
//! operations. It carries the default permission modes and the filesystem
//! charset, both fixed at construction.
//!
//! # Examples
//!
//! ```
//! use filekit::Filesystem;
//!
//! let temp = tempfile::tempdir().unwrap();
//! let root = temp.path().to_str().unwrap();
//! let fs = Filesystem::new();
//!
//! fs.mkdir_r(&format!("{root}/a/b/c"), None).unwrap();
//! fs.save_file(&format!("{root}/a/b/c/note.txt"), b"hello", None).unwrap();
//! assert!(fs.is_file(&format!("{root}/a/b/c/note.txt")));
//!
//! fs.rm(&format!("{root}/a")).unwrap();
//! assert!(!fs.file_exists(&format!("{root}/a")));
//! ```

mod file_ops;
mod listing;
pub mod permission;
mod probe;
mod tree;

use std::path::{Path, PathBuf};

use crate::config::{ConfigValidator, FsConfig};
use crate::error::Result;
use crate::path::{
    is_drive_specifier, localize_for, normalize, Convention, PathCharset, PathResolver,
};

pub use listing::natural_cmp;
pub use permission::{PermissionSpec, DEFAULT_MODE};
pub use tree::{CompareOptions, RemoveEmptyDirOptions};

/// Filesystem operations with fixed default permissions and charset.
///
/// The value is immutable once built and can be shared freely between
/// threads. Operations are synchronous and hold no handles between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filesystem {
    permissions: PermissionSpec,
    resolver: PathResolver,
}

impl Filesystem {
    /// Create a filesystem with default permissions and no charset
    /// conversion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filesystem from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a permission mode is malformed or the
    /// filesystem encoding is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::config::FsConfig;
    /// use filekit::Filesystem;
    ///
    /// let config = FsConfig {
    ///     file_default_permission: Some("644".into()),
    ///     dir_default_permission: Some("755".into()),
    ///     filesystem_encoding: None,
    /// };
    /// let fs = Filesystem::with_config(&config).unwrap();
    /// assert_eq!(fs.permissions().file(), 0o644);
    /// ```
    pub fn with_config(config: &FsConfig) -> Result<Self> {
        ConfigValidator::validate(config)?;
        let permissions = PermissionSpec::from_config(config)?;
        let charset = PathCharset::from_label(config.filesystem_encoding.as_deref())?;
        Ok(Self {
            permissions,
            resolver: PathResolver::new().with_charset(charset),
        })
    }

    /// Replace the default permission modes.
    #[must_use]
    pub const fn with_permissions(mut self, permissions: PermissionSpec) -> Self {
        self.permissions = permissions;
        self
    }

    /// Replace the filesystem charset.
    #[must_use]
    pub const fn with_charset(mut self, charset: PathCharset) -> Self {
        self.resolver = self.resolver.with_charset(charset);
        self
    }

    /// The default permission modes.
    #[must_use]
    pub const fn permissions(&self) -> PermissionSpec {
        self.permissions
    }

    /// The filesystem charset.
    #[must_use]
    pub const fn charset(&self) -> PathCharset {
        self.resolver.charset()
    }

    /// The resolver used for path resolution.
    #[must_use]
    pub const fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Check whether the host uses the Windows path convention.
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        Convention::host().is_windows()
    }

    /// Check whether the host uses the Unix path convention.
    #[must_use]
    pub const fn is_unix(&self) -> bool {
        !self.is_windows()
    }

    /// Normalize a path to forward slashes. See [`crate::path::normalize`].
    #[must_use]
    pub fn normalize(&self, path: &str) -> String {
        normalize(path)
    }

    /// Localize a path to the host convention. See [`crate::path::localize`].
    #[must_use]
    pub fn localize(&self, path: &str) -> String {
        localize_for(path, self.resolver.convention())
    }

    /// Resolve a path against an anchor. See [`PathResolver::resolve`].
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor is unusable.
    pub fn resolve(&self, path: &str, anchor: Option<&str>) -> Result<String> {
        self.resolver.resolve(path, anchor)
    }

    /// Compute a relative path. See [`PathResolver::relativize`].
    ///
    /// # Errors
    ///
    /// Returns an error if either side cannot be resolved.
    pub fn relativize(&self, path: &str, anchor: Option<&str>) -> Result<String> {
        self.resolver.relativize(path, anchor)
    }

    /// Convert a localized path string into an OS path.
    fn os_path(&self, local: &str) -> PathBuf {
        self.charset().to_os_path(local)
    }

    fn separator(&self) -> char {
        self.resolver.convention().separator()
    }

    /// Decode an OS path for messages and logs.
    fn display(&self, os: &Path) -> String {
        self.charset().from_os_path(os)
    }

    /// The parent directory of a path, `.` for a bare name.
    fn parent_of(&self, path: &str) -> String {
        let sep = self.separator();
        let local = self.localize(path);
        let trimmed = local.trim_end_matches(sep);
        if trimmed.is_empty() {
            return if local.is_empty() {
                ".".to_string()
            } else {
                sep.to_string()
            };
        }

        match trimmed.rfind(sep) {
            None => ".".to_string(),
            Some(0) => sep.to_string(),
            Some(pos) if is_drive_specifier(&trimmed[..pos]) => trimmed[..=pos].to_string(),
            Some(pos) => trimmed[..pos].to_string(),
        }
    }
}

/// The directory holding an OS path, `.` for a bare name.
fn parent_dir(os: &Path) -> &Path {
    match os.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => os,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filesystem() {
        let fs = Filesystem::new();
        assert_eq!(fs.permissions(), PermissionSpec::default());
        assert_eq!(fs.charset(), PathCharset::default());
        assert_ne!(fs.is_unix(), fs.is_windows());
    }

    #[test]
    fn test_with_config_rejects_bad_encoding() {
        let config = FsConfig {
            filesystem_encoding: Some("no-such-charset".to_string()),
            ..Default::default()
        };
        assert!(Filesystem::with_config(&config).is_err());
    }

    #[test]
    fn test_with_config_sets_charset() {
        let config = FsConfig {
            filesystem_encoding: Some("Shift_JIS".to_string()),
            ..Default::default()
        };
        let fs = Filesystem::with_config(&config).unwrap();
        assert!(fs.charset().encoding().is_some());
    }

    #[test]
    #[cfg(unix)]
    fn test_parent_of() {
        let fs = Filesystem::new();
        assert_eq!(fs.parent_of("/a/b/c"), "/a/b");
        assert_eq!(fs.parent_of("/a/b/"), "/a");
        assert_eq!(fs.parent_of("/a"), "/");
        assert_eq!(fs.parent_of("/"), "/");
        assert_eq!(fs.parent_of("name"), ".");
    }

    #[test]
    #[cfg(unix)]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("/a/b")), Path::new("/a"));
        assert_eq!(parent_dir(Path::new("/a/b/")), Path::new("/a"));
        assert_eq!(parent_dir(Path::new("/")), Path::new("/"));
        assert_eq!(parent_dir(Path::new("name")), Path::new("."));
    }
}
