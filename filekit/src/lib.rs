#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # filekit
//!
//! A cross-platform filesystem library.
//!
//! It normalizes and resolves path strings without touching the disk,
//! performs single-entry and recursive file operations, and reads and
//! writes CSV in a chosen charset.
//!
//! ## Core Types
//!
//! - [`Filesystem`]: probes, file operations and tree operations
//! - [`PathResolver`] and [`Convention`]: path resolution for POSIX or
//!   Windows conventions
//! - [`FsConfig`]: default permissions and file name charset
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use filekit::{normalize, Convention, PathResolver};
//!
//! assert_eq!(normalize(r"C:\work\src\"), "/work/src/");
//!
//! let resolver = PathResolver::new().with_convention(Convention::Windows);
//! assert_eq!(
//!     resolver.resolve(r"..\lib\", Some(r"C:\work\src")).unwrap(),
//!     r"C:\work\lib\"
//! );
//! ```
//!
//! ```
//! use filekit::Filesystem;
//!
//! let temp = tempfile::tempdir().unwrap();
//! let root = temp.path().to_str().unwrap();
//! let fs = Filesystem::new();
//!
//! fs.mkdir_r(&format!("{root}/a/b"), None).unwrap();
//! fs.save_file(&format!("{root}/a/b/note.txt"), b"hello", None).unwrap();
//! assert_eq!(fs.ls(&format!("{root}/a")).unwrap(), vec!["b"]);
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod path;
pub mod text;

// Re-export key types at crate root for convenience
pub use config::FsConfig;
pub use error::{EntryKind, Error, Result};
pub use fs::{CompareOptions, Filesystem, PermissionSpec, RemoveEmptyDirOptions};
pub use path::{localize, normalize, Convention, PathResolver};
pub use text::{mk_csv, CsvReadOptions, CsvTable, CsvWriteOptions, LineEnding};
