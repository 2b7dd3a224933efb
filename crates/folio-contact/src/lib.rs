//! # Folio Contact
//!
//! The contact form: field validation, submission through a hosted form
//! relay, and the status banner that follows a submission.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod controller;
pub mod error;
pub mod form;
pub mod relay;

pub use controller::{ContactController, SubmissionStatus, DEFAULT_BANNER_DURATION};
pub use error::{ContactError, ContactResult};
pub use form::{is_valid_email, ContactForm, EMAIL_REGEX, Field, FieldErrors, MESSAGE_MIN_CHARS};
pub use relay::{
    check_relay_config, FormRelay, MessageRelay, RelayCheck, RelayConfig, RelayPayload, FORM_ID_ENV,
    PLACEHOLDER_FORM_ID,
};
