//! Light/dark theme preference

use crate::error::I18nError;
use crate::storage::PreferenceStorage;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key under which the theme preference is stored
pub const THEME_STORAGE_KEY: &str = "theme";

/// Requested color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light palette
    Light,
    /// Dark palette
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

impl Theme {
    /// Stored representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Translation key for the theme's label
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Light => "theme.light",
            Self::Dark | Self::System => "theme.dark",
        }
    }
}

impl FromStr for Theme {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(I18nError::UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holder of the theme preference, persisted best-effort like the language
#[derive(Debug)]
pub struct ThemeState {
    storage: Arc<dyn PreferenceStorage>,
    theme: RwLock<Theme>,
    system_prefers_dark: bool,
}

impl ThemeState {
    /// Load the stored theme, falling back to [`Theme::System`]
    pub fn new(storage: Arc<dyn PreferenceStorage>, system_prefers_dark: bool) -> Self {
        let theme = match storage.get(THEME_STORAGE_KEY) {
            Ok(Some(value)) => value.parse::<Theme>().unwrap_or_else(|e| {
                debug!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::System,
            Err(e) => {
                warn!("Failed to load theme preference from storage: {}", e);
                Theme::System
            }
        };
        Self {
            storage,
            theme: RwLock::new(theme),
            system_prefers_dark,
        }
    }

    /// Requested theme
    pub fn theme(&self) -> Theme {
        *self.theme.read()
    }

    /// Effective theme, with `System` mapped through the OS preference
    pub fn resolved(&self) -> Theme {
        match self.theme() {
            Theme::System if self.system_prefers_dark => Theme::Dark,
            Theme::System => Theme::Light,
            theme => theme,
        }
    }

    /// Set the theme and persist it
    pub fn set_theme(&self, theme: Theme) {
        *self.theme.write() = theme;
        if let Err(e) = self.storage.set(THEME_STORAGE_KEY, theme.as_str()) {
            warn!("Failed to save theme preference to storage: {}", e);
        }
    }

    /// Flip between light and dark based on the effective theme
    pub fn toggle(&self) -> Theme {
        let next = if self.resolved() == Theme::Light {
            Theme::Dark
        } else {
            Theme::Light
        };
        self.set_theme(next);
        next
    }
}
