//! Application-wide error types using thiserror.

use folio_common::FolioError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] FolioError),

    /// Translation loading error.
    #[error("Translation error: {0}")]
    I18n(#[from] folio_i18n::I18nError),

    /// Repository source error.
    #[error("GitHub error: {0}")]
    GitHub(#[from] folio_github::GitHubError),

    /// Contact relay error.
    #[error("Contact error: {0}")]
    Contact(#[from] folio_contact::ContactError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the site application.
pub type SiteResult<T> = Result<T, SiteError>;
