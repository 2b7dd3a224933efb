//! Translation resolution with single-hop fallback and memoization

use crate::metrics::{LookupMetrics, MetricsRecorder};
use crate::store::TranslationStore;
use crate::Locale;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Resolver behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Emit a warning for every key that fails to resolve in a locale
    pub warn_missing: bool,
    /// Time each lookup into the metrics recorder
    pub record_metrics: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            warn_missing: cfg!(debug_assertions),
            record_metrics: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    locale: Locale,
    key: String,
    fallback: Option<String>,
}

/// Resolves dot-path keys against a [`TranslationStore`]
///
/// Resolution order for `(locale, key, fallback)`:
/// 1. the text at `key` in `locale`,
/// 2. the text at `key` in [`Locale::DEFAULT`] when `locale` is not the default,
/// 3. `fallback` when it is non-empty,
/// 4. `key` itself.
///
/// Results are memoized until [`Resolver::clear_cache`] is called.
#[derive(Debug)]
pub struct Resolver {
    store: TranslationStore,
    cache: DashMap<CacheKey, String>,
    options: ResolverOptions,
    metrics: Arc<MetricsRecorder>,
}

impl Resolver {
    /// Create a resolver with default options
    pub fn new(store: TranslationStore) -> Self {
        Self::with_options(store, ResolverOptions::default())
    }

    /// Create a resolver with explicit options
    pub fn with_options(store: TranslationStore, options: ResolverOptions) -> Self {
        Self {
            store,
            cache: DashMap::new(),
            options,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// Resolve `key` for `locale`, never failing
    pub fn resolve(&self, locale: Locale, key: &str, fallback: Option<&str>) -> String {
        let started = Instant::now();
        let cache_key = CacheKey {
            locale,
            key: key.to_string(),
            fallback: fallback.map(str::to_string),
        };

        if let Some(hit) = self.cache.get(&cache_key) {
            let text = hit.value().clone();
            drop(hit);
            self.record(started, true);
            return text;
        }

        let text = self.resolve_uncached(locale, key, fallback);
        self.cache.insert(cache_key, text.clone());
        self.record(started, false);
        text
    }

    /// Whether `key` resolves to text in `locale` or the default locale
    pub fn has_key(&self, locale: Locale, key: &str) -> bool {
        self.lookup(locale, key).is_some() || self.lookup(Locale::DEFAULT, key).is_some()
    }

    /// Drop every memoized resolution
    pub fn clear_cache(&self) {
        let cleared = self.cache.len();
        self.cache.clear();
        debug!("Cleared {} cached translations", cleared);
    }

    /// Number of memoized resolutions
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Lookup counters since creation or the last reset
    pub fn metrics(&self) -> LookupMetrics {
        self.metrics.snapshot()
    }

    /// Shared handle to the metrics recorder, for periodic reporting
    pub fn metrics_recorder(&self) -> Arc<MetricsRecorder> {
        Arc::clone(&self.metrics)
    }

    /// The underlying store
    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    fn resolve_uncached(&self, locale: Locale, key: &str, fallback: Option<&str>) -> String {
        if let Some(text) = self.lookup(locale, key) {
            return text.to_string();
        }
        self.report_missing(locale, key);

        if !locale.is_default() {
            if let Some(text) = self.lookup(Locale::DEFAULT, key) {
                debug!("Key '{}' resolved through default locale {}", key, Locale::DEFAULT);
                return text.to_string();
            }
            self.report_missing(Locale::DEFAULT, key);
        }

        match fallback {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => key.to_string(),
        }
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.store.dictionary(locale)?.lookup(key).text()
    }

    fn report_missing(&self, locale: Locale, key: &str) {
        if self.options.warn_missing {
            warn!("Missing translation key: \"{}\" for language: \"{}\"", key, locale);
        }
    }

    fn record(&self, started: Instant, cache_hit: bool) {
        if self.options.record_metrics {
            self.metrics.record(started.elapsed(), cache_hit);
        }
    }
}
