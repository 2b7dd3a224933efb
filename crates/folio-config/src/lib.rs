//! # Folio Config
//!
//! Type-safe configuration management for the Folio portfolio.
//!
//! Configuration is read from YAML or TOML, overridden from the environment,
//! and validated before the site is assembled from it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
