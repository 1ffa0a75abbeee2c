//! Conversion between path strings and OS paths under a filesystem charset.
//!
//! Paths are handled as Unicode strings throughout the crate. When the
//! filesystem stores names in a legacy encoding such as Shift_JIS, every path
//! is encoded right before it reaches the OS and every name read back from
//! the OS is decoded again. On platforms whose native path type is not a raw
//! byte string the conversion is the identity.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};

use crate::error::Result;
use crate::text::encoding::charset;

/// The charset used for names on the filesystem.
///
/// The default is the identity conversion.
///
/// # Examples
///
/// ```
/// use filekit::path::PathCharset;
///
/// let identity = PathCharset::default();
/// assert_eq!(identity.to_os_path("/tmp/a.txt"), std::path::PathBuf::from("/tmp/a.txt"));
///
/// let sjis = PathCharset::from_label(Some("SJIS")).unwrap();
/// assert_eq!(sjis.encoding().map(|e| e.name()), Some("Shift_JIS"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathCharset {
    encoding: Option<&'static Encoding>,
}

impl PathCharset {
    /// Create a charset conversion for the given encoding.
    ///
    /// `None` and UTF-8 both mean the identity conversion.
    #[must_use]
    pub fn new(encoding: Option<&'static Encoding>) -> Self {
        Self {
            encoding: encoding.filter(|enc| *enc != UTF_8),
        }
    }

    /// Build a charset conversion from an optional label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCharset`](crate::Error::UnknownCharset) if the
    /// label does not name a supported encoding.
    pub fn from_label(label: Option<&str>) -> Result<Self> {
        let encoding = label.map(charset).transpose()?;
        Ok(Self::new(encoding))
    }

    /// The encoding names are converted to, if any.
    #[must_use]
    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.encoding
    }

    /// Convert a path string into the form handed to the OS.
    #[must_use]
    pub fn to_os_path(&self, path: &str) -> PathBuf {
        match self.encoding {
            Some(encoding) => encode_os(encoding, path),
            None => PathBuf::from(path),
        }
    }

    /// Convert an OS path back into a path string.
    #[must_use]
    pub fn from_os_path(&self, path: &Path) -> String {
        self.from_os_str(path.as_os_str())
    }

    /// Convert an OS name (for example a directory entry) into a string.
    #[must_use]
    pub fn from_os_str(&self, name: &OsStr) -> String {
        match self.encoding {
            Some(encoding) => decode_os(encoding, name),
            None => name.to_string_lossy().into_owned(),
        }
    }
}

#[cfg(unix)]
fn encode_os(encoding: &'static Encoding, path: &str) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let (bytes, _, _) = encoding.encode(path);
    PathBuf::from(OsString::from_vec(bytes.into_owned()))
}

#[cfg(not(unix))]
fn encode_os(_encoding: &'static Encoding, path: &str) -> PathBuf {
    PathBuf::from(path)
}

#[cfg(unix)]
fn decode_os(encoding: &'static Encoding, name: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;

    let (text, _) = encoding.decode_without_bom_handling(name.as_bytes());
    text.into_owned()
}

#[cfg(not(unix))]
fn decode_os(_encoding: &'static Encoding, name: &OsStr) -> String {
    name.to_string_lossy().into_owned()
}
