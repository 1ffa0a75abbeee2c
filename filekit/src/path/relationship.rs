//! Relative path computation between two absolute paths.
//!
//! This is the pure half of relativization: both inputs are already
//! resolved, so the work is a segment-wise comparison. The filesystem-aware
//! half lives in [`PathResolver::relativize`](super::PathResolver::relativize).

use super::normalize::localize_for;
use super::types::Convention;

/// Compute the relative path that leads from `anchor` to `path`.
///
/// Both paths should be absolute and free of `.` and `..` segments. Drive
/// letters are ignored under [`Convention::Windows`]. The result always
/// starts with `.` or `..`, and ends with a separator when
/// `directory_intent` is set.
///
/// # Examples
///
/// ```
/// use filekit::path::{relative_path, Convention};
///
/// let rel = relative_path("/a/b/c.txt", "/a", Convention::Posix, false);
/// assert_eq!(rel, "./b/c.txt");
///
/// let rel = relative_path("/a/c.txt", "/a/b/d", Convention::Posix, false);
/// assert_eq!(rel, "../../c.txt");
///
/// let rel = relative_path(r"C:\a\b", r"C:\a\x", Convention::Windows, true);
/// assert_eq!(rel, r"..\b\");
/// ```
#[must_use]
pub fn relative_path(
    path: &str,
    anchor: &str,
    convention: Convention,
    directory_intent: bool,
) -> String {
    let sep = convention.separator();
    let path_segments = segments(path, convention);
    let anchor_segments = segments(anchor, convention);

    let common = path_segments
        .iter()
        .zip(&anchor_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::with_capacity(anchor_segments.len() + path_segments.len());
    if anchor_segments.len() > common {
        parts.extend(std::iter::repeat("..").take(anchor_segments.len() - common));
    } else {
        parts.push(".");
    }
    parts.extend(path_segments[common..].iter().map(String::as_str));

    let mut buf = [0; 4];
    let sep_str: &str = sep.encode_utf8(&mut buf);
    let mut rel = parts.join(sep_str);
    if directory_intent {
        rel.push(sep);
    }
    rel
}

/// Split a path into its non-empty segments, ignoring any drive letter.
fn segments(path: &str, convention: Convention) -> Vec<String> {
    let sep = convention.separator();
    let local = localize_for(path, convention);
    let mut body = local.as_str();

    if convention.is_windows() {
        let bytes = body.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            body = &body[2..];
        }
    }

    body.split(sep)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}
