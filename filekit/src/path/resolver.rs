//! Path resolution against an anchor directory.
//!
//! This module provides the `PathResolver` type, which turns a possibly
//! relative, possibly non-existent path into an absolute one. Paths that exist
//! are canonicalized by the OS; the rest are resolved by walking their
//! segments.

use std::path::Path;

use crate::error::{Error, Result};
use crate::path::canonicalize::{self, canonicalize};
use crate::path::charset::PathCharset;
use crate::path::normalize::{localize_for, split_root};
use crate::path::relationship::relative_path;
use crate::path::types::{has_directory_intent, is_drive_root, is_drive_specifier, Convention};

/// Resolves paths against an anchor directory.
///
/// A trailing separator on the input marks it as a directory; the resolved
/// output keeps that trailing separator (except on the filesystem root).
///
/// # Examples
///
/// ```
/// use filekit::path::{Convention, PathResolver};
///
/// let resolver = PathResolver::new().with_convention(Convention::Windows);
/// let resolved = resolver.resolve(r"..\logs\", Some(r"C:\app\bin")).unwrap();
/// assert_eq!(resolved, r"C:\app\logs\");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathResolver {
    /// Separator convention the input is localized to.
    convention: Convention,
    /// Charset used whenever a path is handed to the OS.
    charset: PathCharset,
}

impl PathResolver {
    /// Create a new path resolver for the host convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::path::{Convention, PathResolver};
    ///
    /// let resolver = PathResolver::new();
    /// assert_eq!(resolver.convention(), Convention::host());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific separator convention.
    ///
    /// Anything other than [`Convention::host`] only makes sense for paths
    /// that do not exist locally, since the OS is still consulted.
    #[must_use]
    pub const fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    /// Use a filesystem charset when probing the OS.
    #[must_use]
    pub const fn with_charset(mut self, charset: PathCharset) -> Self {
        self.charset = charset;
        self
    }

    /// The separator convention in use.
    #[must_use]
    pub const fn convention(&self) -> Convention {
        self.convention
    }

    /// The filesystem charset in use.
    #[must_use]
    pub const fn charset(&self) -> PathCharset {
        self.charset
    }

    /// Resolve `path` against `anchor` (the current directory by default).
    ///
    /// If the anchor is an existing directory it is canonicalized first;
    /// otherwise it must at least look absolute. A self-rooted `path`
    /// ignores the anchor. When the combined path exists, the OS canonical
    /// form is returned; otherwise `.` and `..` segments are resolved
    /// textually. A `..` above the root stays at the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvableAnchor`] if the anchor is neither an
    /// existing directory nor an absolute path, or an I/O error if
    /// canonicalizing the anchor fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::path::PathResolver;
    ///
    /// # #[cfg(unix)]
    /// # {
    /// let resolver = PathResolver::new();
    /// let resolved = resolver
    ///     .resolve("../../../no-such-dir/aaa.txt", Some("/no-such-anchor/"))
    ///     .unwrap();
    /// assert_eq!(resolved, "/no-such-dir/aaa.txt");
    /// # }
    /// ```
    pub fn resolve(&self, path: &str, anchor: Option<&str>) -> Result<String> {
        let sep = self.convention.separator();
        let directory_intent = has_directory_intent(path);
        let local = localize_for(path, self.convention);
        let base = self.resolve_anchor(anchor.unwrap_or("."))?;

        let (prefix, body, base) = match split_root(&local, self.convention) {
            Some((prefix, body)) => (prefix, body, ""),
            None => ("", local.as_str(), base.as_str()),
        };
        let working = format!("{base}{sep}.{sep}{body}");

        let literal = self.charset.to_os_path(&format!("{prefix}{working}"));
        if literal.exists() {
            if let Ok(real) = canonicalize(&literal) {
                let mut resolved = self.charset.from_os_path(&real);
                if directory_intent && !canonicalize::is_root(&real) && !resolved.ends_with(sep) {
                    resolved.push(sep);
                }
                log::trace!("resolved {path:?} on disk to {resolved:?}");
                return Ok(resolved);
            }
        }

        let walked = resolve_segments(&working, self.convention);
        let mut resolved = format!("{prefix}{walked}");
        if directory_intent && !resolved.ends_with(sep) {
            resolved.push(sep);
        }
        log::trace!("resolved {path:?} textually to {resolved:?}");
        Ok(resolved)
    }

    /// Compute the relative path from `anchor` to `path`.
    ///
    /// The anchor defaults to the current directory; when it names a file
    /// its parent directory is used. `path` is resolved against the anchor
    /// before the two are compared segment by segment.
    ///
    /// # Errors
    ///
    /// Returns an error if either side cannot be resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::path::PathResolver;
    ///
    /// # #[cfg(unix)]
    /// # {
    /// let resolver = PathResolver::new();
    /// let rel = resolver
    ///     .relativize("/no-such-root/aaa.txt", Some("/no-such-root/sub/"))
    ///     .unwrap();
    /// assert_eq!(rel, "../aaa.txt");
    /// # }
    /// ```
    pub fn relativize(&self, path: &str, anchor: Option<&str>) -> Result<String> {
        let directory_intent = has_directory_intent(path);
        let anchor = self.relativize_anchor(anchor)?;
        let resolved = self.resolve(path, Some(&anchor))?;
        Ok(relative_path(
            &resolved,
            &anchor,
            self.convention,
            directory_intent,
        ))
    }

    /// Turn the anchor into an absolute directory string.
    fn resolve_anchor(&self, anchor: &str) -> Result<String> {
        let local = localize_for(anchor, self.convention);
        let os = self.charset.to_os_path(&local);
        if os.is_dir() {
            return self.canonical_string(&os);
        }
        if split_root(&local, self.convention).is_some() {
            return Ok(local);
        }
        Err(Error::UnresolvableAnchor {
            anchor: anchor.to_string(),
        })
    }

    /// Pick the directory a relative path is measured from.
    fn relativize_anchor(&self, anchor: Option<&str>) -> Result<String> {
        let Some(anchor) = anchor.filter(|a| !a.is_empty()) else {
            let cwd = canonicalize::current_dir()?;
            return Ok(self.charset.from_os_path(&cwd));
        };

        let local = localize_for(anchor, self.convention);
        let os = self.charset.to_os_path(&local);
        if os.is_dir() {
            return self.canonical_string(&os);
        }
        if os.is_file() {
            if let Some(parent) = os.parent().filter(|p| !p.as_os_str().is_empty()) {
                return self.canonical_string(parent);
            }
            let cwd = canonicalize::current_dir()?;
            return Ok(self.charset.from_os_path(&cwd));
        }
        self.resolve(anchor, None)
    }

    fn canonical_string(&self, os: &Path) -> Result<String> {
        let real = canonicalize(os)?;
        Ok(self.charset.from_os_path(&real))
    }
}

/// Resolve `.` and `..` segments of a localized path textually.
///
/// Empty and `.` segments are dropped and `..` pops the last segment. Popping
/// past the root leaves the root in place; a leading drive specifier under
/// [`Convention::Windows`] is kept without a separator in front of it and
/// survives any number of `..` segments. An empty result becomes the root
/// separator.
///
/// # Examples
///
/// ```
/// use filekit::path::{resolve_segments, Convention};
///
/// assert_eq!(resolve_segments("/a/./b/../c", Convention::Posix), "/a/c");
/// assert_eq!(resolve_segments("/a/../../..", Convention::Posix), "/");
/// assert_eq!(resolve_segments(r"C:\a\..\b", Convention::Windows), r"C:\b");
/// ```
#[must_use]
pub fn resolve_segments(path: &str, convention: Convention) -> String {
    let sep = convention.separator();
    let mut out = String::with_capacity(path.len());

    for (idx, segment) in path.split(sep).enumerate() {
        match segment {
            "" | "." => {}
            ".." if convention.is_windows() && is_drive_specifier(&out) => {}
            ".." => {
                let parent_len = match out.rfind(sep) {
                    Some(0) => sep.len_utf8(),
                    Some(pos) => pos,
                    None => 0,
                };
                out.truncate(parent_len);
                if out.len() == sep.len_utf8() && out.starts_with(sep) {
                    out.clear();
                } else if is_drive_root(&out) {
                    out.truncate(2);
                }
            }
            _ => {
                if !(idx == 0 && convention.is_windows() && is_drive_specifier(segment)) {
                    out.push(sep);
                }
                out.push_str(segment);
            }
        }
    }

    if out.is_empty() || is_drive_specifier(&out) {
        out.push(sep);
    }
    out
}
