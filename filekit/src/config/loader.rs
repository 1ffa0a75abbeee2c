//! Configuration file loading.

use std::fs;
use std::path::Path;

use crate::config::environment::EnvironmentConfig;
use crate::config::schema::FsConfig;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML, the default.
    Yaml,
    /// JSON, chosen for files ending in `.json`.
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Loads [`FsConfig`] from files and the environment.
///
/// # Examples
///
/// ```
/// use filekit::config::ConfigLoader;
///
/// let temp = tempfile::tempdir().unwrap();
/// let path = temp.path().join("filekit.yaml");
/// std::fs::write(&path, "dir_default_permission: \"750\"\n").unwrap();
///
/// let config = ConfigLoader::load_file(&path).unwrap();
/// assert_eq!(config.dir_default_permission.as_deref(), Some("750"));
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration file, YAML or JSON by extension.
    ///
    /// The result is not validated; see [`ConfigLoader::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load_file(path: &Path) -> Result<FsConfig> {
        let contents = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
        log::debug!("loading configuration from {}", path.display());
        Self::parse(&contents, ConfigFormat::from_path(path)).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] or [`Error::Json`] if the text is malformed
    /// or names an unknown field.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<FsConfig> {
        match format {
            ConfigFormat::Yaml if contents.trim().is_empty() => Ok(FsConfig::default()),
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(contents)?),
            ConfigFormat::Json => Ok(serde_json::from_str(contents)?),
        }
    }

    /// Build the effective configuration.
    ///
    /// Starts from defaults, applies `path` if given, then `FILEKIT_*`
    /// environment overrides, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, an environment value
    /// is malformed, or the merged configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<FsConfig> {
        let mut config = FsConfig::default();
        if let Some(path) = path {
            config.merge_from(&Self::load_file(path)?);
        }
        EnvironmentConfig::apply_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let err = ConfigLoader::load_file(Path::new("/nonexistent/filekit/config.yaml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let result = ConfigLoader::load_file(&config_path);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_load_valid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yml");
        fs::write(
            &config_path,
            "file_default_permission: \"640\"\nfilesystem_encoding: SJIS-win\n",
        )
        .unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config.file_default_permission.as_deref(), Some("640"));
        assert_eq!(config.filesystem_encoding.as_deref(), Some("SJIS-win"));
    }

    #[test]
    fn test_load_json_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.JSON");
        fs::write(&config_path, r#"{"dir_default_permission": "711"}"#).unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config.dir_default_permission.as_deref(), Some("711"));
    }

    #[test]
    fn test_parse_empty_yaml() {
        let config = ConfigLoader::parse("   \n", ConfigFormat::Yaml).unwrap();
        assert_eq!(config, FsConfig::default());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), ConfigFormat::Yaml);
    }
}
