//! Translation layer for the Folio portfolio
//!
//! This crate provides the bilingual (Spanish/English) text layer:
//!
//! - Static nested dictionaries per locale, embedded at build time
//! - A resolver with single-hop fallback to the default locale and memoization
//! - Lazy, shared loading of dictionaries from other sources
//! - The language state holder with durable preference storage
//! - Scoped access for consumers and the theme preference
//!
//! # Example
//!
//! ```rust
//! use folio_i18n::{LanguageState, Locale, MemoryStorage, Resolver, TranslationStore};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = Arc::new(Resolver::new(TranslationStore::embedded()?));
//! let state = LanguageState::new(resolver, Arc::new(MemoryStorage::new()), None);
//!
//! assert_eq!(state.t("navigation.home"), "Inicio");
//! state.set_locale(Locale::English);
//! assert_eq!(state.t("navigation.home"), "Home");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod dictionary;
pub mod error;
pub mod loader;
pub mod locale;
pub mod metrics;
pub mod resolver;
pub mod scope;
pub mod state;
pub mod storage;
pub mod store;
pub mod theme;

pub use dictionary::{Dictionary, Lookup, TranslationNode};
pub use error::{I18nError, I18nResult};
pub use loader::{DictionaryLoader, DictionarySource, DirectorySource, EmbeddedSource};
pub use locale::Locale;
pub use metrics::{spawn_reporter, LookupMetrics, MetricsRecorder, ReporterHandle, DEFAULT_REPORT_INTERVAL};
pub use resolver::{Resolver, ResolverOptions};
pub use scope::{try_use_language, use_language, LanguageScope, ScopeGuard};
pub use state::{LanguageState, Subscription};
pub use storage::{
    DisabledStorage, FileStorage, MemoryStorage, PreferenceStorage, StorageError, LANGUAGE_STORAGE_KEY,
};
pub use store::{TranslationStore, TranslationStoreBuilder};
pub use theme::{Theme, ThemeState, THEME_STORAGE_KEY};
