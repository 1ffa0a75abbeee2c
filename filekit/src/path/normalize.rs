//! Path normalization functions.
//!
//! Two flavours of separator cleanup live here:
//! - [`normalize`] produces a portable forward-slash form and keeps URL-ish
//!   prefixes such as `https://` or a leading `//` intact
//! - [`localize`] produces the native form for the host, collapsing every run
//!   of separators
//!
//! Neither function touches the filesystem.

use super::types::Convention;

/// Normalize a path or URL to forward slashes.
///
/// Leading and trailing whitespace is trimmed, backslashes become `/`, a
/// leading drive letter (`C:/`) is dropped, and runs of `/` collapse to one.
/// A scheme prefix (`https://`) or a leading double slash survives intact.
///
/// # Examples
///
/// ```
/// use filekit::path::normalize;
///
/// assert_eq!(normalize(r".\aaa\bbb.html"), "./aaa/bbb.html");
/// assert_eq!(normalize("https://example.com//a///b"), "https://example.com/a/b");
/// assert_eq!(normalize(r"C:\test\windows\path\"), "/test/windows/path/");
/// assert_eq!(normalize("//server//share"), "//server/share");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let unified = raw.trim().replace('\\', "/");
    let unified = strip_drive(&unified, '/');
    let (prefix, body) = split_scheme(unified);

    let mut out = String::with_capacity(unified.len());
    out.push_str(prefix);
    push_collapsed(&mut out, body, '/', '/');
    out
}

/// Localize a path to the host's native separator convention.
///
/// # Examples
///
/// ```
/// # #[cfg(unix)]
/// # {
/// use filekit::path::localize;
///
/// assert_eq!(localize(r"C:\data\\logs\"), "/data/logs/");
/// assert_eq!(localize("a//b"), "a/b");
/// # }
/// ```
#[must_use]
pub fn localize(raw: &str) -> String {
    localize_for(raw, Convention::host())
}

/// Localize a path to an explicit separator convention.
///
/// Both separator kinds are accepted on input and every run of separators
/// collapses to a single native separator. Under [`Convention::Posix`] a
/// leading drive letter is dropped; under [`Convention::Windows`] it is kept.
///
/// # Examples
///
/// ```
/// use filekit::path::{localize_for, Convention};
///
/// assert_eq!(localize_for(r"C:\a//b\", Convention::Posix), "/a/b/");
/// assert_eq!(localize_for("C:/a//b/", Convention::Windows), r"C:\a\b\");
/// assert_eq!(localize_for(r"\\server\share", Convention::Windows), r"\server\share");
/// ```
#[must_use]
pub fn localize_for(raw: &str, convention: Convention) -> String {
    let unified = raw.replace('\\', "/");
    let unified = match convention {
        Convention::Posix => strip_drive(&unified, '/'),
        Convention::Windows => unified.as_str(),
    };

    let mut out = String::with_capacity(unified.len());
    push_collapsed(&mut out, unified, '/', convention.separator());
    out
}

/// Split an already localized path into its root prefix and the remainder.
///
/// Returns `None` for relative paths. For absolute ones the prefix is the
/// drive specifier (`C:`) or an empty string for a bare leading separator,
/// and the remainder is everything after the root separator.
///
/// # Examples
///
/// ```
/// use filekit::path::{split_root, Convention};
///
/// assert_eq!(split_root("/var/log", Convention::Posix), Some(("", "var/log")));
/// assert_eq!(split_root(r"C:\Users", Convention::Windows), Some(("C:", "Users")));
/// assert_eq!(split_root("var/log", Convention::Posix), None);
/// ```
#[must_use]
pub fn split_root(local: &str, convention: Convention) -> Option<(&str, &str)> {
    let sep = convention.separator();
    let bytes = local.as_bytes();

    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && local[2..].starts_with(sep)
    {
        return Some((&local[..2], &local[3..]));
    }

    let rest = local.strip_prefix(sep)?;
    match rest.strip_prefix(sep) {
        Some(after_double) => Some((&local[..sep.len_utf8()], after_double)),
        None => Some(("", rest)),
    }
}

/// Drop a leading `X:` when it is directly followed by `sep`.
fn strip_drive(path: &str, sep: char) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && path[2..].starts_with(sep) {
        &path[2..]
    } else {
        path
    }
}

/// Split a forward-slash path into a preserved prefix and a body.
///
/// The prefix is `scheme:/` or `/` when the path continues with a second
/// slash; the body then starts with that second slash.
fn split_scheme(path: &str) -> (&str, &str) {
    let scheme_len = path.bytes().take_while(u8::is_ascii_alphanumeric).count();
    let head = if scheme_len > 0 && path[scheme_len..].starts_with(':') {
        scheme_len + 1
    } else {
        0
    };

    if path[head..].starts_with("//") {
        path.split_at(head + 1)
    } else {
        ("", path)
    }
}

/// Append `input` to `out`, collapsing runs of `from` into a single `to`.
fn push_collapsed(out: &mut String, input: &str, from: char, to: char) {
    let mut previous_was_sep = false;
    for ch in input.chars() {
        if ch == from {
            if !previous_was_sep {
                out.push(to);
            }
            previous_was_sep = true;
        } else {
            out.push(ch);
            previous_was_sep = false;
        }
    }
}
