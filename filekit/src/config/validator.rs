//! Configuration validation.

use crate::config::schema::FsConfig;
use crate::error::{Error, Result};
use crate::text::encoding::charset;

/// Largest accepted mode, permission bits plus setuid, setgid and sticky.
pub const MAX_MODE: u32 = 0o7777;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use filekit::config::{ConfigValidator, FsConfig};
///
/// ConfigValidator::validate(&FsConfig::default()).unwrap();
///
/// let bad = FsConfig {
///     file_default_permission: Some("rw-r--r--".to_string()),
///     ..Default::default()
/// };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a malformed permission mode and
    /// [`Error::UnknownCharset`] for an unrecognised encoding label.
    pub fn validate(config: &FsConfig) -> Result<()> {
        if let Some(ref mode) = config.file_default_permission {
            parse_mode("file_default_permission", mode)?;
        }

        if let Some(ref mode) = config.dir_default_permission {
            parse_mode("dir_default_permission", mode)?;
        }

        if let Some(ref label) = config.filesystem_encoding {
            charset(label)?;
        }

        Ok(())
    }
}

/// Parse an octal permission string such as `"644"`, `"0755"` or `"0o700"`.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming `field` if the value is empty, not
/// octal, or above [`MAX_MODE`].
///
/// # Examples
///
/// ```
/// use filekit::config::validator::parse_mode;
///
/// assert_eq!(parse_mode("mode", "0755").unwrap(), 0o755);
/// assert_eq!(parse_mode("mode", "2775").unwrap(), 0o2775);
/// assert!(parse_mode("mode", "8").is_err());
/// ```
pub fn parse_mode(field: &str, value: &str) -> Result<u32> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);

    let invalid = |message: String| Error::Validation {
        field: field.into(),
        message,
    };

    if digits.is_empty() || !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return Err(invalid(format!("'{value}' is not an octal mode")));
    }

    let mode = u32::from_str_radix(digits, 8)
        .ok()
        .filter(|mode| *mode <= MAX_MODE)
        .ok_or_else(|| invalid(format!("'{value}' exceeds {MAX_MODE:o}")))?;
    Ok(mode)
}
