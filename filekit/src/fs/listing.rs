//! Directory listings in natural order.

use std::cmp::Ordering;
use std::ffi::OsString;
use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use super::Filesystem;
use crate::error::{EntryKind, Error, Result};

impl Filesystem {
    /// List the entry names of a directory in natural order.
    ///
    /// `.` and `..` are never included. Names are decoded with the
    /// filesystem charset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the path does not exist,
    /// [`Error::TypeMismatch`] if it is not a directory, or an I/O error if
    /// it cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::Filesystem;
    ///
    /// let temp = tempfile::tempdir().unwrap();
    /// for name in ["img10.png", "img2.png", "img1.png"] {
    ///     std::fs::write(temp.path().join(name), "").unwrap();
    /// }
    ///
    /// let names = Filesystem::new().ls(temp.path().to_str().unwrap()).unwrap();
    /// assert_eq!(names, ["img1.png", "img2.png", "img10.png"]);
    /// ```
    pub fn ls(&self, path: &str) -> Result<Vec<String>> {
        let local = self.localize(path);
        let os = self.os_path(&local);
        if !os.exists() {
            return Err(Error::PathNotFound { path: local });
        }
        if !os.is_dir() {
            return Err(Error::TypeMismatch {
                path: local,
                expected: EntryKind::Directory,
            });
        }

        Ok(self
            .sorted_entries(&os)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    /// The raw entry names of a directory, in the order `ls` lists them.
    ///
    /// Names are handed back exactly as the OS returned them, so entries
    /// the charset cannot decode can still be opened.
    pub(super) fn entry_names(&self, os: &Path) -> Result<Vec<OsString>> {
        Ok(self
            .sorted_entries(os)?
            .into_iter()
            .map(|(_, raw)| raw)
            .collect())
    }

    fn sorted_entries(&self, os: &Path) -> Result<Vec<(String, OsString)>> {
        let charset = self.charset();
        let mut entries = Vec::new();
        for entry in fs::read_dir(os).map_err(|e| Error::from_io(self.display(os), e))? {
            let entry = entry.map_err(|e| Error::from_io(self.display(os), e))?;
            let raw = entry.file_name();
            entries.push((charset.from_os_str(&raw), raw));
        }
        entries.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
        Ok(entries)
    }
}

/// Compare two strings so that embedded numbers sort by value.
///
/// Runs of ASCII digits compare numerically (leading zeros ignored, with
/// the shorter run first on a tie); everything else compares by character.
///
/// # Examples
///
/// ```
/// use filekit::fs::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
/// assert_eq!(natural_cmp("a", "b"), Ordering::Less);
/// assert_eq!(natural_cmp("x1y", "x1y"), Ordering::Equal);
/// ```
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = compare_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.cmp(&r);
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.next_if(char::is_ascii_digit) {
        run.push(ch);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_value = a.trim_start_matches('0');
    let b_value = b.trim_start_matches('0');
    a_value
        .len()
        .cmp(&b_value.len())
        .then_with(|| a_value.cmp(b_value))
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_natural_cmp_numbers() {
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        assert_eq!(natural_cmp("a10b", "a9b"), Ordering::Greater);
        assert_eq!(natural_cmp("v1.2.10", "v1.2.9"), Ordering::Greater);
    }

    #[test]
    fn test_natural_cmp_leading_zeros() {
        assert_eq!(natural_cmp("007", "7"), Ordering::Greater);
        assert_eq!(natural_cmp("007", "8"), Ordering::Less);
    }

    #[test]
    fn test_natural_cmp_prefix() {
        assert_eq!(natural_cmp("abc", "abcd"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn test_natural_sort() {
        let mut names = vec!["b", "a10", "a2", "a1", "B"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["B", "a1", "a2", "a10", "b"]);
    }

    #[test]
    fn test_ls_sorted() {
        let temp = tempdir().unwrap();
        std::fs::create_dir(temp.path().join("dir3")).unwrap();
        std::fs::write(temp.path().join("dir20"), "").unwrap();
        std::fs::write(temp.path().join("dir1"), "").unwrap();

        let names = Filesystem::new().ls(temp.path().to_str().unwrap()).unwrap();
        assert_eq!(names, vec!["dir1", "dir3", "dir20"]);
    }

    #[test]
    fn test_ls_empty_directory() {
        let temp = tempdir().unwrap();
        let names = Filesystem::new().ls(temp.path().to_str().unwrap()).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_ls_errors() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("f");
        std::fs::write(&file, "").unwrap();
        let kit = Filesystem::new();

        let err = kit.ls(temp.path().join("missing").to_str().unwrap()).unwrap_err();
        assert!(err.is_not_found());

        let err = kit.ls(file.to_str().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: EntryKind::Directory,
                ..
            }
        ));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Natural comparison is antisymmetric
            #[test]
            fn natural_cmp_antisymmetric(a in "[a-c0-9]{0,8}", b in "[a-c0-9]{0,8}") {
                prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
            }

            /// Natural comparison only reports equality for equal strings
            #[test]
            fn natural_cmp_equal_iff_same(a in "[a-c0-9]{0,8}", b in "[a-c0-9]{0,8}") {
                prop_assert_eq!(natural_cmp(&a, &b) == Ordering::Equal, a == b);
            }
        }
    }
}
