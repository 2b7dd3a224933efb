//! Supported locales

use crate::error::I18nError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Supported display languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    /// Spanish (`es`)
    #[serde(rename = "es")]
    Spanish,
    /// English (`en`)
    #[serde(rename = "en")]
    English,
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Locale {
    /// Locale every lookup falls back to
    pub const DEFAULT: Self = Self::Spanish;

    /// Get the storage/language code for this locale
    pub fn code(self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
        }
    }

    /// Parse a locale from a BCP 47 language tag
    ///
    /// Only the language subtag counts, so `es-AR` and `en-GB` are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    /// Parse a stored preference; only the exact codes are accepted
    pub fn from_stored(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|locale| locale.code() == value)
    }

    /// Get all supported locales, default first
    pub fn all() -> [Self; 2] {
        [Self::Spanish, Self::English]
    }

    /// Whether this is the fallback locale
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    /// Get the display name for this locale
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Spanish => "Español",
            Self::English => "English",
        }
    }

    /// Label shown on the language toggle
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Spanish => "ES",
            Self::English => "EN",
        }
    }

    /// The other supported locale
    pub fn toggled(self) -> Self {
        match self {
            Self::Spanish => Self::English,
            Self::English => Self::Spanish,
        }
    }

    /// Dictionary file name for this locale
    pub fn resource_file(self) -> String {
        format!("{}.json", self.code())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let langid: LanguageIdentifier = s
            .trim()
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(s.to_string()))?;
        match langid.language.as_str() {
            "es" => Ok(Self::Spanish),
            "en" => Ok(Self::English),
            _ => Err(I18nError::UnsupportedLocale(s.to_string())),
        }
    }
}
