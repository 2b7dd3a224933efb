//! Lazy, memoized loading of locale dictionaries

use crate::dictionary::Dictionary;
use crate::error::{I18nError, I18nResult};
use crate::store::{embedded_text, TranslationStore};
use crate::Locale;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Where raw dictionary text comes from
#[async_trait]
pub trait DictionarySource: Send + Sync + fmt::Debug {
    /// Fetch the JSON text for `locale`
    async fn fetch(&self, locale: Locale) -> I18nResult<String>;
}

/// Serves the dictionaries compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

#[async_trait]
impl DictionarySource for EmbeddedSource {
    async fn fetch(&self, locale: Locale) -> I18nResult<String> {
        Ok(embedded_text(locale).to_string())
    }
}

/// Reads `<dir>/<code>.json`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Read dictionaries from `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DictionarySource for DirectorySource {
    async fn fetch(&self, locale: Locale) -> I18nResult<String> {
        let path = self.dir.join(locale.resource_file());
        debug!("Reading dictionary file {:?}", path);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| I18nError::LoadFailed {
                locale: locale.code().to_string(),
                reason: format!("{}: {}", path.display(), e),
            })
    }
}

type SharedLoad = Shared<BoxFuture<'static, I18nResult<Arc<Dictionary>>>>;

/// Loads each locale at most once and shares the result between callers
pub struct DictionaryLoader {
    source: Arc<dyn DictionarySource>,
    loads: Mutex<HashMap<Locale, SharedLoad>>,
}

impl fmt::Debug for DictionaryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryLoader")
            .field("source", &self.source)
            .field("started", &self.loads.lock().len())
            .finish()
    }
}

impl DictionaryLoader {
    /// Create a loader over `source`
    pub fn new(source: Arc<dyn DictionarySource>) -> Self {
        Self {
            source,
            loads: Mutex::new(HashMap::new()),
        }
    }

    /// Loader over the embedded dictionaries
    pub fn embedded() -> Self {
        Self::new(Arc::new(EmbeddedSource))
    }

    /// Load `locale`, falling back to the default locale once when it fails
    #[instrument(skip(self))]
    pub async fn load(&self, locale: Locale) -> I18nResult<Arc<Dictionary>> {
        match self.shared_load(locale).await {
            Ok(dictionary) => Ok(dictionary),
            Err(e) if !locale.is_default() => {
                warn!("Failed to load dictionary for {}: {}; using {}", locale, e, Locale::DEFAULT);
                self.shared_load(Locale::DEFAULT).await
            }
            Err(e) => Err(e),
        }
    }

    /// Start loading `locales` in the background
    ///
    /// Failures are logged, not returned. Must be called within a tokio runtime.
    pub fn preload(&self, locales: &[Locale]) -> Vec<JoinHandle<()>> {
        locales
            .iter()
            .map(|&locale| {
                let load = self.shared_load(locale);
                tokio::spawn(async move {
                    if let Err(e) = load.await {
                        warn!("Failed to preload dictionary for {}: {}", locale, e);
                    }
                })
            })
            .collect()
    }

    /// Whether `locale` finished loading successfully
    pub fn is_loaded(&self, locale: Locale) -> bool {
        self.loads
            .lock()
            .get(&locale)
            .and_then(Shared::peek)
            .is_some_and(Result::is_ok)
    }

    /// Forget every started or finished load
    pub fn clear(&self) {
        self.loads.lock().clear();
        debug!("Cleared dictionary load cache");
    }

    /// Load `locales` and assemble a store from the ones that succeed
    ///
    /// A locale that fails is left out so the resolver falls back for it; a
    /// failure of the default locale is an error.
    pub async fn load_store(&self, locales: &[Locale]) -> I18nResult<TranslationStore> {
        let mut builder = TranslationStore::builder();
        for &locale in locales {
            match self.shared_load(locale).await {
                Ok(dictionary) => builder = builder.shared(locale, dictionary),
                Err(e) if !locale.is_default() => {
                    warn!("Leaving {} out of the store: {}", locale, e);
                }
                Err(e) => return Err(e),
            }
        }
        let store = builder.build();
        info!("Assembled translation store for {:?}", store.locales());
        Ok(store)
    }

    fn shared_load(&self, locale: Locale) -> SharedLoad {
        let mut loads = self.loads.lock();
        loads
            .entry(locale)
            .or_insert_with(|| {
                debug!("Starting dictionary load for {}", locale);
                let source = Arc::clone(&self.source);
                async move {
                    let text = source.fetch(locale).await?;
                    let dictionary = Dictionary::from_json(locale, &text)?;
                    Ok::<_, I18nError>(Arc::new(dictionary))
                }
                .boxed()
                .shared()
            })
            .clone()
    }
}
