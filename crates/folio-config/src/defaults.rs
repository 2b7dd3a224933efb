//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

/// GitHub REST API base.
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Account shown when none is configured.
pub const DEFAULT_GITHUB_USERNAME: &str = "Ezequiel-Caviglione";

/// Repositories requested per listing.
pub const DEFAULT_GITHUB_LIMIT: u32 = 6;

/// GitHub request timeout in seconds.
pub const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 15;

/// Seconds the contact status banner stays visible.
pub const DEFAULT_BANNER_SECS: u64 = 3;

/// Directory for the preferences file.
pub const DEFAULT_STORAGE_DIR: &str = ".folio";

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            owner: "Ezequiel Caviglione".to_string(),
            base_url: "http://localhost:4321".to_string(),
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_language: "es".to_string(),
            locales_dir: None,
            missing_key_warnings: cfg!(debug_assertions),
        }
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            username: DEFAULT_GITHUB_USERNAME.to_string(),
            limit: DEFAULT_GITHUB_LIMIT,
            timeout_secs: DEFAULT_GITHUB_TIMEOUT_SECS,
            fetch_languages: true,
        }
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            form_id: None,
            banner_secs: DEFAULT_BANNER_SECS,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
