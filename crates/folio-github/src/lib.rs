//! # Folio GitHub
//!
//! Public repository listing for the project showcase.
//!
//! [`GitHubClient`] talks to the GitHub REST API, enriches every repository
//! with its language breakdown and orders the result. [`ProjectShowcase`]
//! holds what the projects section renders and swaps in a static dataset
//! when the API cannot be reached.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod ranking;
pub mod showcase;
pub mod source;
pub mod types;

pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use error::{GitHubError, GitHubResult};
pub use fallback::fallback_repositories;
pub use ranking::{language_shares, primary_language_share, showcase_score, sort_for_showcase, MAX_LANGUAGES};
pub use showcase::{ProjectShowcase, ShowcaseSnapshot};
pub use source::{RepositorySource, StaticSource};
pub use types::{LanguageShare, Repository};
