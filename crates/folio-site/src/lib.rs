//! # Folio Site
//!
//! Wires the translation layer, the GitHub showcase and the contact form
//! together and renders the text of every site section.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod render;
pub mod timeline;

pub use app::{FolioSite, FolioSiteBuilder};
pub use error::*;
