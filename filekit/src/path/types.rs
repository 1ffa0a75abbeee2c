//! Core types for path handling.
//!
//! This module defines the separator convention a path string is read under
//! and a few predicates over raw path text that the resolver and the tree
//! operations share.

/// The separator convention paths are localized to.
///
/// Resolution and localization are pure string transformations once the
/// convention is fixed, so the Windows rules can be exercised on any host.
///
/// # Examples
///
/// ```
/// use filekit::path::Convention;
///
/// assert_eq!(Convention::Posix.separator(), '/');
/// assert_eq!(Convention::Windows.separator(), '\\');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convention {
    /// Forward-slash separated paths rooted at `/`.
    Posix,
    /// Backslash separated paths that may carry a drive letter.
    Windows,
}

impl Convention {
    /// The convention of the platform this crate was compiled for.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// The native separator character.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }

    /// Check whether this is the Windows convention.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl Default for Convention {
    fn default() -> Self {
        Self::host()
    }
}

/// Check whether a raw path ends in a separator of either kind.
///
/// A trailing separator signals that the caller means a directory, and the
/// resolver carries that intent through to its output.
///
/// # Examples
///
/// ```
/// use filekit::path::has_directory_intent;
///
/// assert!(has_directory_intent("/var/log/"));
/// assert!(has_directory_intent("C:\\data\\"));
/// assert!(!has_directory_intent("/var/log"));
/// ```
#[must_use]
pub fn has_directory_intent(raw: &str) -> bool {
    raw.ends_with(['/', '\\'])
}

/// Check whether a segment is a bare drive specifier such as `C:`.
#[must_use]
pub fn is_drive_specifier(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Check whether a path is a drive root: `C:` followed only by separators.
#[must_use]
pub fn is_drive_root(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && bytes[2..].iter().all(|b| matches!(b, b'/' | b'\\'))
}
