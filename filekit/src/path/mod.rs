//! Path string handling: normalization, resolution and relativization.
//!
//! Paths are plain strings here. Nothing in this module requires a path to
//! exist, although [`PathResolver`] asks the OS for the canonical form of
//! paths that do.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! [`normalize`] unifies separators to `/` and collapses duplicates while
//! keeping a URL scheme (`https://`) or a leading `//` intact. [`localize`]
//! produces the native form for the host instead.
//!
//! ## Resolution
//!
//! [`PathResolver::resolve`] anchors a relative path at a directory and
//! removes `.` and `..` segments. A trailing separator on the input is
//! *directory intent* and is carried through to the output.
//!
//! ## Conventions
//!
//! Every transformation is parameterized by a [`Convention`], so the
//! Windows rules (drive letters, backslashes) can be used on any host.
//!
//! # Examples
//!
//! ```
//! use filekit::path::{normalize, Convention, PathResolver};
//!
//! assert_eq!(normalize(r"a\b//c"), "a/b/c");
//!
//! let resolver = PathResolver::new().with_convention(Convention::Windows);
//! let resolved = resolver.resolve(r".\x\..\y.txt", Some(r"C:\work")).unwrap();
//! assert_eq!(resolved, r"C:\work\y.txt");
//!
//! let relative = resolver.relativize(r"C:\work\y.txt", Some(r"C:\work\sub\")).unwrap();
//! assert_eq!(relative, r"..\y.txt");
//! ```

pub mod canonicalize;
pub mod charset;
pub mod info;
pub mod normalize;
pub mod relationship;
pub mod resolver;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use charset::PathCharset;
pub use info::{basename, dirpath, extension, pathinfo, trim_extension, PathInfo};
pub use normalize::{localize, localize_for, normalize, split_root};
pub use relationship::relative_path;
pub use resolver::{resolve_segments, PathResolver};
pub use types::{has_directory_intent, is_drive_root, is_drive_specifier, Convention};
