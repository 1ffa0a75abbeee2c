//! Configuration schema definitions.
//!
//! [`FsConfig`] is the construction-time configuration of a
//! [`Filesystem`](crate::Filesystem). Every field is optional; a missing
//! field means the built-in default.

use serde::{Deserialize, Deserializer, Serialize};

/// Filesystem configuration.
///
/// Permission modes are octal strings such as `"644"` or `"0755"`. In YAML
/// an unquoted number is accepted too and read digit for digit, so
/// `dir_default_permission: 755` means `0o755`.
///
/// # Examples
///
/// ```
/// use filekit::config::FsConfig;
///
/// let config: FsConfig = serde_yaml::from_str(
///     "file_default_permission: \"644\"\ndir_default_permission: 755\n",
/// )
/// .unwrap();
/// assert_eq!(config.file_default_permission.as_deref(), Some("644"));
/// assert_eq!(config.dir_default_permission.as_deref(), Some("755"));
/// assert_eq!(config.filesystem_encoding, None);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FsConfig {
    /// Mode applied to files created or copied by the library.
    #[serde(
        default,
        deserialize_with = "deserialize_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_default_permission: Option<String>,

    /// Mode applied to directories created or copied by the library.
    #[serde(
        default,
        deserialize_with = "deserialize_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub dir_default_permission: Option<String>,

    /// Charset of file names on disk. Unset means UTF-8.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem_encoding: Option<String>,
}

impl FsConfig {
    /// Overwrite fields of `self` with the fields set in `other`.
    pub fn merge_from(&mut self, other: &FsConfig) {
        if other.file_default_permission.is_some() {
            self.file_default_permission
                .clone_from(&other.file_default_permission);
        }
        if other.dir_default_permission.is_some() {
            self.dir_default_permission
                .clone_from(&other.dir_default_permission);
        }
        if other.filesystem_encoding.is_some() {
            self.filesystem_encoding.clone_from(&other.filesystem_encoding);
        }
    }
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Helper {
        Number(u32),
        Text(String),
    }

    Ok(
        Option::<Helper>::deserialize(deserializer)?.map(|mode| match mode {
            Helper::Number(digits) => digits.to_string(),
            Helper::Text(text) => text,
        }),
    )
}
