//! Contact submission errors

use crate::form::FieldErrors;
use folio_common::FolioError;
use thiserror::Error;

/// Result alias for contact operations
pub type ContactResult<T> = Result<T, ContactError>;

/// Ways a submission can fail
#[derive(Error, Debug)]
pub enum ContactError {
    /// One or more fields did not validate
    #[error("invalid contact form: {0}")]
    Invalid(FieldErrors),

    /// No relay form id is configured
    #[error("contact relay is not configured")]
    NotConfigured,

    /// A submission is already in flight
    #[error("a submission is already in progress")]
    InProgress,

    /// The relay answered with a non-success status
    #[error("relay rejected the submission with status {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The request never produced a response
    #[error("relay request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl From<ContactError> for FolioError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Invalid(errors) => FolioError::Validation {
                message: errors.to_string(),
                field: errors.fields().next().map(|f| f.as_str().to_string()),
            },
            ContactError::Rejected { status, body } => FolioError::relay(
                format!("relay rejected the submission with status {status}: {body}"),
                Some(status),
            ),
            ContactError::Request(e) => FolioError::network_with_source("relay request failed", e),
            other => FolioError::relay(other.to_string(), None),
        }
    }
}
