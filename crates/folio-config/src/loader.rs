//! Configuration loading from YAML or TOML with environment overrides.

use crate::schema::Config;
use crate::validator::ValidationIssue;
use folio_common::{FolioError, Result as FolioResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG_PATH";

/// Files probed in the working directory, in order
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["folio.yaml", "folio.yml", "folio.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl From<ConfigError> for FolioError {
    fn from(err: ConfigError) -> Self {
        FolioError::config(err.to_string())
    }
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse_str(&content, format)?;
        debug!("Parsed configuration from {}", path.display());

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration text without overrides or validation
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        })
    }

    /// Load configuration from the environment and the first file found
    ///
    /// Lookup order is `FOLIO_CONFIG_PATH`, then `folio.yaml`, `folio.yml`
    /// and `folio.toml` in the working directory, else the defaults.
    pub fn load() -> FolioResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            info!("Loading configuration from {}={}", CONFIG_PATH_ENV, config_path);
            return Ok(Self::load_config(&config_path)?);
        }

        if let Some(found) = CONFIG_FILE_CANDIDATES.iter().map(Path::new).find(|p| p.exists()) {
            info!("Loading configuration from {}", found.display());
            return Ok(Self::load_config(found)?);
        }

        info!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> FolioResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply process environment overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(language) = lookup("FOLIO_LANGUAGE") {
            config.i18n.default_language = language;
        }

        if let Some(username) = lookup("FOLIO_GITHUB_USERNAME") {
            config.github.username = username;
        }

        if let Some(limit) = lookup("FOLIO_GITHUB_LIMIT") {
            config.github.limit = limit.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "FOLIO_GITHUB_LIMIT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(form_id) = lookup("PUBLIC_FORMSPREE_FORM_ID") {
            config.contact.form_id = Some(form_id);
        }

        if let Some(dir) = lookup("FOLIO_STORAGE_DIR") {
            config.storage.dir = PathBuf::from(dir);
        }

        if let Some(level) = lookup("FOLIO_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("folio.yaml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("folio.YML")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("folio.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("folio.json")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("folio")), None);
    }

    #[test]
    fn test_parse_partial_yaml_keeps_defaults() {
        let config = ConfigLoader::parse_str("github:\n  limit: 4\n", ConfigFormat::Yaml).unwrap();
        assert_eq!(config.github.limit, 4);
        assert_eq!(config.github.username, "Ezequiel-Caviglione");
        assert_eq!(config.i18n.default_language, "es");
    }

    #[test]
    fn test_parse_toml() {
        let toml = "[i18n]\ndefault_language = \"en\"\n\n[contact]\nform_id = \"abc123\"\n";
        let config = ConfigLoader::parse_str(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.i18n.default_language, "en");
        assert_eq!(config.contact.form_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_empty_file_is_defaults() {
        assert_eq!(ConfigLoader::parse_str("  \n", ConfigFormat::Toml).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = ConfigLoader::parse_str("github: [unclosed", ConfigFormat::Yaml);
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("FOLIO_LANGUAGE", "en"),
            ("FOLIO_GITHUB_USERNAME", "octocat"),
            ("FOLIO_GITHUB_LIMIT", " 12 "),
            ("PUBLIC_FORMSPREE_FORM_ID", "mwkgabcd"),
            ("FOLIO_STORAGE_DIR", "/tmp/folio"),
            ("FOLIO_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(&mut config, |var| env.get(var).map(ToString::to_string)).unwrap();

        assert_eq!(config.i18n.default_language, "en");
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.limit, 12);
        assert_eq!(config.contact.form_id.as_deref(), Some("mwkgabcd"));
        assert_eq!(config.storage.dir, PathBuf::from("/tmp/folio"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_parse_error() {
        let mut config = Config::default();
        let result = ConfigLoader::apply_overrides_from(&mut config, |var| {
            (var == "FOLIO_GITHUB_LIMIT").then(|| "six".to_string())
        });
        assert!(matches!(result, Err(ConfigError::EnvParseError { ref var, .. }) if var == "FOLIO_GITHUB_LIMIT"));
    }

    #[test]
    fn test_no_overrides_changes_nothing() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(&mut config, no_env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config(".json", "{}");
        assert!(matches!(
            ConfigLoader::load_config(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/folio.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_config_error_into_folio_error() {
        let err: FolioError = ConfigError::UnsupportedFormat(PathBuf::from("folio.ini")).into();
        assert!(matches!(err, FolioError::Config { .. }));
        assert!(err.to_string().contains("folio.ini"));
    }
}
