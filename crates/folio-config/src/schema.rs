//! Configuration schema definitions.
//!
//! Every section deserializes with `#[serde(default)]`, so a file only needs
//! to name the values it changes.

use folio_common::LoggingConfig;
use folio_i18n::Locale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity.
    pub site: SiteSettings,
    /// Translation settings.
    pub i18n: I18nSettings,
    /// GitHub repository source.
    pub github: GitHubSettings,
    /// Contact form relay.
    pub contact: ContactSettings,
    /// Preference storage.
    pub storage: StorageSettings,
    /// Log output.
    pub logging: LoggingSettings,
}

/// Site identity shown in the rendered sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Portfolio owner's display name.
    pub owner: String,
    /// Public URL of the site.
    pub base_url: String,
}

/// Translation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nSettings {
    /// Locale used when nothing is stored (`es` or `en`).
    pub default_language: String,
    /// Directory holding `<code>.json` dictionaries; embedded ones when unset.
    pub locales_dir: Option<PathBuf>,
    /// Log every missing translation key.
    pub missing_key_warnings: bool,
}

impl I18nSettings {
    /// The configured default language as a [`Locale`], if supported.
    pub fn locale(&self) -> Option<Locale> {
        Locale::from_code(&self.default_language)
    }
}

/// GitHub repository source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// REST API base URL.
    pub api_base: String,
    /// Account whose public repositories are listed.
    pub username: String,
    /// Number of repositories requested.
    pub limit: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Fetch the per-repository language breakdown.
    pub fetch_languages: bool,
}

impl GitHubSettings {
    /// Request timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Contact form relay settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// Relay form identifier; the relay is unconfigured without one.
    pub form_id: Option<String>,
    /// Seconds a success or failure banner stays before returning to idle.
    pub banner_secs: u64,
}

impl ContactSettings {
    /// Banner duration as a [`Duration`].
    pub const fn banner_duration(&self) -> Duration {
        Duration::from_secs(self.banner_secs)
    }
}

/// Preference storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the preferences file.
    pub dir: PathBuf,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `folio_github=debug`.
    pub level: String,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
    /// Optional log file.
    pub file: Option<String>,
}

impl LoggingSettings {
    /// Logging setup for [`folio_common::init_logging`].
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json,
            pretty_format: !self.json && self.file.is_none(),
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
