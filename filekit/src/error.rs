//! Error types for the filekit library.
//!
//! This module provides the error hierarchy shared by every fallible
//! operation in the crate, using `thiserror` for ergonomic error handling.

use std::fmt;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Result type alias for operations that may fail with a filekit error.
///
/// # Examples
///
/// ```
/// use filekit::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(0o755)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of filesystem entry an operation expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// The main error type for the filekit library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path, or an ancestor it requires, does not exist.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A readability or writability check failed.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be accessed.
        path: String,
    },

    /// The entry exists but is of the wrong kind.
    #[error("expected a {expected} at {path}")]
    TypeMismatch {
        /// The offending path.
        path: String,
        /// The kind of entry the operation needed.
        expected: EntryKind,
    },

    /// The entry exists in a form that blocks the operation.
    #[error("conflict at {path}: {reason}")]
    Conflict {
        /// The offending path.
        path: String,
        /// Why the existing entry is incompatible.
        reason: String,
    },

    /// An anchor directory could not be interpreted as absolute.
    #[error("cannot resolve against anchor {anchor:?}: not an existing directory or absolute path")]
    UnresolvableAnchor {
        /// The anchor as supplied by the caller.
        anchor: String,
    },

    /// A best-effort recursive operation finished with failures.
    #[error("{failures} step(s) failed under {path}")]
    Incomplete {
        /// The root of the recursive operation.
        path: String,
        /// How many individual steps failed.
        failures: usize,
    },

    /// A charset label was not recognised.
    #[error("unknown charset: {label}")]
    UnknownCharset {
        /// The label that could not be resolved.
        label: String,
    },

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An underlying OS call failed after its preconditions passed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path the call was made on.
        path: String,
        /// The OS error.
        #[source]
        source: io::Error,
    },

    /// An I/O error not tied to a single path.
    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),

    /// CSV input could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A YAML configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify an OS error raised while operating on `path`.
    ///
    /// `NotFound` and `PermissionDenied` map onto their dedicated variants;
    /// every other kind is kept as [`Error::Io`].
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::Error;
    /// use std::io;
    ///
    /// let err = Error::from_io("/missing", io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.is_not_found());
    /// ```
    pub fn from_io(path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().to_string_lossy().into_owned();
        match err.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::Error;
    ///
    /// let err = Error::PathNotFound { path: "/nonexistent".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::Error;
    ///
    /// let err = Error::PermissionDenied { path: "/restricted".into() };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}
