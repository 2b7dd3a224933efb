//! Current-locale state holder

use crate::resolver::Resolver;
use crate::storage::{PreferenceStorage, LANGUAGE_STORAGE_KEY};
use crate::Locale;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

type Listener = Arc<dyn Fn(Locale) + Send + Sync>;

/// Owner of the current locale
///
/// Consumers receive the holder explicitly (usually as `Arc<LanguageState>`),
/// read the current locale, translate through [`LanguageState::t`], and
/// request changes through [`LanguageState::set_locale`]. Every change is
/// written through to preference storage and announced synchronously to all
/// subscribers.
pub struct LanguageState {
    resolver: Arc<Resolver>,
    storage: Arc<dyn PreferenceStorage>,
    current: RwLock<Locale>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    persistent: AtomicBool,
}

impl fmt::Debug for LanguageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageState")
            .field("current", &*self.current.read())
            .field("listeners", &self.listeners.lock().len())
            .field("persistent", &self.is_persistent())
            .finish_non_exhaustive()
    }
}

impl LanguageState {
    /// Create the holder and pick the initial locale
    ///
    /// An explicit `initial` locale wins and skips storage entirely. Otherwise
    /// a supported code found in storage is used, else [`Locale::DEFAULT`].
    pub fn new(
        resolver: Arc<Resolver>,
        storage: Arc<dyn PreferenceStorage>,
        initial: Option<Locale>,
    ) -> Arc<Self> {
        Self::with_default(resolver, storage, initial, Locale::DEFAULT)
    }

    /// Like [`LanguageState::new`], starting in `default` when nothing usable is stored
    pub fn with_default(
        resolver: Arc<Resolver>,
        storage: Arc<dyn PreferenceStorage>,
        initial: Option<Locale>,
        default: Locale,
    ) -> Arc<Self> {
        let mut persistent = true;
        let locale = match initial {
            Some(locale) => {
                debug!("Using explicit initial locale {}", locale);
                locale
            }
            None => match storage.get(LANGUAGE_STORAGE_KEY) {
                Ok(Some(code)) => Locale::from_stored(&code).unwrap_or_else(|| {
                    debug!("Ignoring unsupported stored locale '{}'", code);
                    default
                }),
                Ok(None) => default,
                Err(e) => {
                    warn!("Failed to load language preference from storage: {}", e);
                    persistent = false;
                    default
                }
            },
        };

        info!("Language state initialized with locale {}", locale);
        Arc::new(Self {
            resolver,
            storage,
            current: RwLock::new(locale),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
            persistent: AtomicBool::new(persistent),
        })
    }

    /// The current locale
    pub fn current_locale(&self) -> Locale {
        *self.current.read()
    }

    /// Translate `key` in the current locale
    pub fn t(&self, key: &str) -> String {
        self.resolver.resolve(self.current_locale(), key, None)
    }

    /// Translate `key` in the current locale with a caller fallback
    pub fn t_or(&self, key: &str, fallback: &str) -> String {
        self.resolver.resolve(self.current_locale(), key, Some(fallback))
    }

    /// The resolver bound to this holder
    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// Change the locale, persist it best-effort and notify subscribers
    pub fn set_locale(&self, locale: Locale) {
        let previous = std::mem::replace(&mut *self.current.write(), locale);
        debug!("Locale changed from {} to {}", previous, locale);

        match self.storage.set(LANGUAGE_STORAGE_KEY, locale.code()) {
            Ok(()) => self.persistent.store(true, Ordering::Relaxed),
            Err(e) => {
                warn!("Failed to save language preference to storage: {}", e);
                self.persistent.store(false, Ordering::Relaxed);
            }
        }

        // Listeners may call back into the holder, so run them unlocked.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(locale);
        }
    }

    /// Switch to the other supported locale and return it
    pub fn toggle_locale(&self) -> Locale {
        let next = self.current_locale().toggled();
        self.set_locale(next);
        next
    }

    /// Register a callback run after every locale change
    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        F: Fn(Locale) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(listener)));
        Subscription {
            id: Some(id),
            state: Arc::downgrade(self),
        }
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Whether the last storage operation succeeded
    pub fn is_persistent(&self) -> bool {
        self.persistent.load(Ordering::Relaxed)
    }

    fn remove_listener(&self, id: u64) {
        self.listeners.lock().retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Registration returned by [`LanguageState::subscribe`]; dropping it unsubscribes
#[must_use = "dropping a Subscription immediately unsubscribes"]
#[derive(Debug)]
pub struct Subscription {
    id: Option<u64>,
    state: Weak<LanguageState>,
}

impl Subscription {
    /// Stop receiving notifications
    pub fn unsubscribe(self) {}

    /// Keep the callback registered for the holder's whole lifetime
    pub fn detach(mut self) {
        self.id = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let (Some(id), Some(state)) = (self.id, self.state.upgrade()) {
            state.remove_listener(id);
        }
    }
}
