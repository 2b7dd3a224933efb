//! Static per-locale translation store

use crate::dictionary::Dictionary;
use crate::error::I18nResult;
use crate::Locale;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Dictionaries compiled into the binary
pub(crate) const EMBEDDED_ES: &str = include_str!("../locales/es.json");
pub(crate) const EMBEDDED_EN: &str = include_str!("../locales/en.json");

/// Raw embedded dictionary text for a locale
pub fn embedded_text(locale: Locale) -> &'static str {
    match locale {
        Locale::Spanish => EMBEDDED_ES,
        Locale::English => EMBEDDED_EN,
    }
}

/// Immutable mapping from locale to its dictionary
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    dictionaries: HashMap<Locale, Arc<Dictionary>>,
}

impl TranslationStore {
    /// Parse every embedded dictionary eagerly
    pub fn embedded() -> I18nResult<Self> {
        let mut builder = Self::builder();
        for locale in Locale::all() {
            builder = builder.json(locale, embedded_text(locale))?;
        }
        let store = builder.build();
        info!("Loaded embedded dictionaries for {} locales", store.dictionaries.len());
        Ok(store)
    }

    /// Start building a store from custom content
    pub fn builder() -> TranslationStoreBuilder {
        TranslationStoreBuilder::default()
    }

    /// Dictionary for a locale, if one was loaded
    pub fn dictionary(&self, locale: Locale) -> Option<&Dictionary> {
        self.dictionaries.get(&locale).map(Arc::as_ref)
    }

    /// Whether a dictionary exists for the locale
    pub fn contains(&self, locale: Locale) -> bool {
        self.dictionaries.contains_key(&locale)
    }

    /// Loaded locales in `Locale::all()` order
    pub fn locales(&self) -> Vec<Locale> {
        Locale::all()
            .into_iter()
            .filter(|locale| self.contains(*locale))
            .collect()
    }

    /// Keys present in the default locale but missing from `locale`
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let Some(reference) = self.dictionary(Locale::DEFAULT) else {
            return Vec::new();
        };
        let target = self.dictionary(locale);
        reference
            .leaf_keys()
            .into_iter()
            .filter(|key| target.and_then(|dict| dict.lookup(key).text()).is_none())
            .collect()
    }
}

/// Builder for [`TranslationStore`]
#[derive(Debug, Default)]
pub struct TranslationStoreBuilder {
    dictionaries: HashMap<Locale, Arc<Dictionary>>,
}

impl TranslationStoreBuilder {
    /// Add an already parsed dictionary
    pub fn dictionary(mut self, locale: Locale, dictionary: Dictionary) -> Self {
        self.dictionaries.insert(locale, Arc::new(dictionary));
        self
    }

    /// Add a shared dictionary
    pub fn shared(mut self, locale: Locale, dictionary: Arc<Dictionary>) -> Self {
        self.dictionaries.insert(locale, dictionary);
        self
    }

    /// Parse and add a JSON dictionary
    pub fn json(self, locale: Locale, text: &str) -> I18nResult<Self> {
        let dictionary = Dictionary::from_json(locale, text)?;
        debug!("Parsed dictionary for {} with {} entries", locale, dictionary.len());
        Ok(self.dictionary(locale, dictionary))
    }

    /// Finish the store
    pub fn build(self) -> TranslationStore {
        TranslationStore {
            dictionaries: self.dictionaries,
        }
    }
}
