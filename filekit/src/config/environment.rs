//! Environment variable handling for configuration overrides.
//!
//! `FILEKIT_*` variables override values read from a configuration file.

use std::env;

use crate::config::schema::FsConfig;
use crate::config::validator::parse_mode;
use crate::error::Result;

/// Overrides `file_default_permission`.
pub const FILE_PERMISSION_VAR: &str = "FILEKIT_FILE_PERMISSION";
/// Overrides `dir_default_permission`.
pub const DIR_PERMISSION_VAR: &str = "FILEKIT_DIR_PERMISSION";
/// Overrides `filesystem_encoding`.
pub const FILESYSTEM_ENCODING_VAR: &str = "FILEKIT_FILESYSTEM_ENCODING";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use filekit::config::{EnvironmentConfig, FsConfig};
///
/// let mut config = FsConfig::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Variables that are unset or empty leave the field alone.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a permission variable is not an octal
    /// mode.
    pub fn apply_overrides(config: &mut FsConfig) -> Result<()> {
        if let Some(mode) = Self::var(FILE_PERMISSION_VAR) {
            parse_mode(FILE_PERMISSION_VAR, &mode)?;
            config.file_default_permission = Some(mode);
        }

        if let Some(mode) = Self::var(DIR_PERMISSION_VAR) {
            parse_mode(DIR_PERMISSION_VAR, &mode)?;
            config.dir_default_permission = Some(mode);
        }

        if let Some(label) = Self::var(FILESYSTEM_ENCODING_VAR) {
            config.filesystem_encoding = Some(label);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        let value = env::var(name).ok()?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            log::debug!("{name} overrides configuration");
            Some(value.to_string())
        }
    }
}
