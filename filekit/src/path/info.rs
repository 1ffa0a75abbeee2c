//! Splitting path strings into directory, name, extension, query and hash.
//!
//! These helpers work on the text alone and accept both separator kinds.
//! Paths taken from URLs may carry a `?query` and a `#hash`; [`pathinfo`]
//! splits those off before looking at the path itself.

/// The parts of a path, as returned by [`pathinfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathInfo {
    /// The parent directory, `.` for a bare name, `None` for empty input.
    pub dirname: Option<String>,
    /// The last path segment.
    pub basename: String,
    /// The text after the last `.` of the basename.
    pub extension: Option<String>,
    /// The basename with its extension removed.
    pub filename: String,
    /// The query string including its leading `?`.
    pub query: Option<String>,
    /// The fragment including its leading `#`.
    pub hash: Option<String>,
}

/// Split a path into its parts.
///
/// The fragment is cut at the first `#`, then the query at the first `?`.
///
/// # Examples
///
/// ```
/// use filekit::path::pathinfo;
///
/// let info = pathinfo("/test.files/aaa/test.html.md?a=b&?c=d#test#.anch");
/// assert_eq!(info.dirname.as_deref(), Some("/test.files/aaa"));
/// assert_eq!(info.basename, "test.html.md");
/// assert_eq!(info.extension.as_deref(), Some("md"));
/// assert_eq!(info.filename, "test.html");
/// assert_eq!(info.query.as_deref(), Some("?a=b&?c=d"));
/// assert_eq!(info.hash.as_deref(), Some("#test#.anch"));
/// ```
#[must_use]
pub fn pathinfo(path: &str) -> PathInfo {
    let (path, hash) = split_suffix(path, '#');
    let (path, query) = split_suffix(path, '?');
    let (dirname, basename) = split_name(path);

    PathInfo {
        dirname,
        basename: basename.to_string(),
        extension: extension(basename),
        filename: trim_extension(basename),
        query,
        hash,
    }
}

/// The last segment of a path, ignoring trailing separators.
///
/// # Examples
///
/// ```
/// use filekit::path::basename;
///
/// assert_eq!(basename("./aaa/").as_deref(), Some("aaa"));
/// assert_eq!(basename("a/b.txt").as_deref(), Some("b.txt"));
/// assert_eq!(basename(""), None);
/// ```
#[must_use]
pub fn basename(path: &str) -> Option<String> {
    let (_, name) = split_name(path);
    (!name.is_empty()).then(|| name.to_string())
}

/// The directory containing the last segment of a path.
///
/// # Examples
///
/// ```
/// use filekit::path::dirpath;
///
/// assert_eq!(dirpath("./aaa/test/").as_deref(), Some("./aaa"));
/// assert_eq!(dirpath("test.html").as_deref(), Some("."));
/// assert_eq!(dirpath("/top").as_deref(), Some("/"));
/// ```
#[must_use]
pub fn dirpath(path: &str) -> Option<String> {
    split_name(path).0
}

/// The extension of a path, ignoring any query or fragment.
///
/// Returns `None` when the last segment has no `.` or nothing after it.
///
/// # Examples
///
/// ```
/// use filekit::path::extension;
///
/// assert_eq!(extension("./test.html?abc#abc").as_deref(), Some("html"));
/// assert_eq!(extension("./test"), None);
/// ```
#[must_use]
pub fn extension(path: &str) -> Option<String> {
    let (path, _) = split_suffix(path, '#');
    let (path, _) = split_suffix(path, '?');
    let (_, name) = split_name(path);
    raw_extension(name)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
}

/// Remove the extension from a path, keeping its directory part.
///
/// # Examples
///
/// ```
/// use filekit::path::trim_extension;
///
/// assert_eq!(trim_extension("./aaa/test.html.md"), "./aaa/test.html");
/// assert_eq!(trim_extension("./aaa/test"), "./aaa/test");
/// ```
#[must_use]
pub fn trim_extension(path: &str) -> String {
    let (_, name) = split_name(path);
    match raw_extension(name) {
        Some(ext) => path
            .strip_suffix(ext)
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(path)
            .to_string(),
        None => path.to_string(),
    }
}

fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

/// Cut `path` at the first `marker`, keeping the marker on the suffix.
fn split_suffix(path: &str, marker: char) -> (&str, Option<String>) {
    match path.split_once(marker) {
        Some((head, tail)) if !tail.is_empty() => (head, Some(format!("{marker}{tail}"))),
        Some((head, _)) => (head, None),
        None => (path, None),
    }
}

/// Split a path into its directory and last segment.
fn split_name(path: &str) -> (Option<String>, &str) {
    if path.is_empty() {
        return (None, "");
    }

    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return (Some(path[..1].to_string()), "");
    }

    match trimmed.rfind(is_separator) {
        Some(pos) => {
            let dir = trimmed[..pos].trim_end_matches(is_separator);
            let dir = if dir.is_empty() { &trimmed[..1] } else { dir };
            (Some(dir.to_string()), &trimmed[pos + 1..])
        }
        None => (Some(".".to_string()), trimmed),
    }
}

/// The text after the last `.` of a name, which may be empty.
fn raw_extension(name: &str) -> Option<&str> {
    name.rfind('.').map(|pos| &name[pos + 1..])
}
