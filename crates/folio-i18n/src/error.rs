//! Error types for internationalization operations

use crate::storage::StorageError;
use folio_common::FolioError;
use thiserror::Error;

/// Errors that can occur during internationalization operations
#[derive(Error, Debug, Clone)]
pub enum I18nError {
    /// A locale code outside the supported set
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// A stored theme value outside light, dark and system
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Text that is not a valid language tag
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Failed to load a dictionary asset
    #[error("Failed to load dictionary for locale {locale}: {reason}")]
    LoadFailed { locale: String, reason: String },

    /// Dictionary text is not a valid nested mapping
    #[error("Failed to parse dictionary for locale {locale}: {reason}")]
    Parse { locale: String, reason: String },

    /// The language state was accessed outside any scope
    #[error("Language state accessed outside of a LanguageScope")]
    OutsideScope,

    /// Durable preference storage failed
    #[error("Preference storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for FolioError {
    fn from(err: I18nError) -> Self {
        match &err {
            I18nError::UnsupportedLocale(code) => {
                FolioError::localization_with_locale(err.to_string(), code.clone())
            }
            I18nError::LoadFailed { locale, .. } | I18nError::Parse { locale, .. } => {
                FolioError::localization_with_locale(err.to_string(), locale.clone())
            }
            I18nError::Storage(source) => {
                FolioError::storage_with_source("Preference storage failed", source.clone())
            }
            _ => FolioError::localization(err.to_string()),
        }
    }
}
