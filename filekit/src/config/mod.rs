//! Configuration for [`Filesystem`](crate::Filesystem).
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults (mode `0775`, UTF-8 file names)
//! 2. A YAML or JSON configuration file
//! 3. Environment variables (`FILEKIT_*`)
//!
//! # Examples
//!
//! ```
//! use filekit::config::{ConfigLoader, ConfigFormat};
//! use filekit::Filesystem;
//!
//! let config = ConfigLoader::parse(
//!     "file_default_permission: \"644\"\ndir_default_permission: \"755\"\n",
//!     ConfigFormat::Yaml,
//! )
//! .unwrap();
//!
//! let fs = Filesystem::with_config(&config).unwrap();
//! assert_eq!(fs.permissions().file(), 0o644);
//! assert_eq!(fs.permissions().dir(), 0o755);
//! ```

pub mod environment;
pub mod loader;
pub mod schema;
pub mod validator;

pub use environment::EnvironmentConfig;
pub use loader::{ConfigFormat, ConfigLoader};
pub use schema::FsConfig;
pub use validator::ConfigValidator;
