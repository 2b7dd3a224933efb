//! Integration tests for the folio-i18n crate.
//!
//! These exercise the language state holder end to end: embedded dictionaries,
//! durable storage on disk, and degraded storage backends.

use folio_common::test_utils::init_test_logging;
use folio_i18n::{
    DirectorySource, DictionaryLoader, FileStorage, LanguageScope, LanguageState, Locale,
    MemoryStorage, PreferenceStorage, Resolver, StorageError, TranslationStore, LANGUAGE_STORAGE_KEY,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Storage that fails every operation with the configured errors
#[derive(Debug)]
struct BrokenStorage {
    read_error: StorageError,
    write_error: StorageError,
    writes_attempted: Mutex<Vec<String>>,
}

impl BrokenStorage {
    fn new() -> Self {
        Self {
            read_error: StorageError::Unavailable("sandboxed".to_string()),
            write_error: StorageError::QuotaExceeded,
            writes_attempted: Mutex::new(Vec::new()),
        }
    }
}

impl PreferenceStorage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(self.read_error.clone())
    }

    fn set(&self, _key: &str, value: &str) -> Result<(), StorageError> {
        self.writes_attempted.lock().push(value.to_string());
        Err(self.write_error.clone())
    }
}

fn embedded_resolver() -> Arc<Resolver> {
    Arc::new(Resolver::new(TranslationStore::embedded().unwrap()))
}

#[test]
fn test_switching_language_end_to_end() {
    init_test_logging();
    let storage = Arc::new(MemoryStorage::new());
    let state = LanguageState::new(embedded_resolver(), storage.clone(), None);

    assert_eq!(state.current_locale(), Locale::Spanish);
    assert_eq!(state.t("navigation.home"), "Inicio");
    assert_eq!(state.t("hero.greeting"), "¡Hola! Soy");
    assert_eq!(state.t("contact.title"), "Contacto");

    state.set_locale(Locale::English);

    assert_eq!(state.t("navigation.home"), "Home");
    assert_eq!(state.t("hero.greeting"), "Hello! I'm");
    assert_eq!(state.t("contact.title"), "Contact");
    assert_eq!(storage.get(LANGUAGE_STORAGE_KEY).unwrap().as_deref(), Some("en"));
}

#[test]
fn test_preference_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = LanguageState::new(embedded_resolver(), Arc::new(FileStorage::new(dir.path())), None);
        state.set_locale(Locale::English);
    }

    let state = LanguageState::new(embedded_resolver(), Arc::new(FileStorage::new(dir.path())), None);
    assert_eq!(state.current_locale(), Locale::English);
    assert!(state.is_persistent());
}

#[test]
fn test_explicit_locale_ignores_persisted_value() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));
    storage.set(LANGUAGE_STORAGE_KEY, "en").unwrap();

    let state = LanguageState::new(embedded_resolver(), storage, Some(Locale::Spanish));
    assert_eq!(state.current_locale(), Locale::Spanish);
}

#[test]
fn test_broken_storage_never_reaches_caller() {
    init_test_logging();
    let storage = Arc::new(BrokenStorage::new());
    let state = LanguageState::new(embedded_resolver(), storage.clone(), None);

    assert_eq!(state.current_locale(), Locale::DEFAULT);
    state.set_locale(Locale::English);
    state.toggle_locale();

    assert_eq!(state.current_locale(), Locale::Spanish);
    assert_eq!(*storage.writes_attempted.lock(), vec!["en".to_string(), "es".to_string()]);
    assert!(!state.is_persistent());
}

#[test]
fn test_language_toggle_inside_scope() {
    let state = LanguageState::new(embedded_resolver(), Arc::new(MemoryStorage::new()), None);

    LanguageScope::run(Arc::clone(&state), || {
        let language = folio_i18n::use_language();
        assert_eq!(language.t("navigation.switchLanguage"), "Cambiar idioma");
        language.toggle_locale();
    });

    assert_eq!(state.current_locale(), Locale::English);
}

#[test]
#[should_panic(expected = "within a LanguageScope")]
fn test_consumer_outside_scope_fails_loudly() {
    let _ = folio_i18n::use_language();
}

#[tokio::test]
async fn test_directory_dictionaries_with_missing_english() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("es.json"),
        r#"{ "navigation": { "home": "Inicio" }, "footer": { "madeWith": "Hecho con" } }"#,
    )
    .unwrap();

    let loader = DictionaryLoader::new(Arc::new(DirectorySource::new(dir.path())));
    let store = loader.load_store(&Locale::all()).await.unwrap();
    assert_eq!(store.locales(), vec![Locale::Spanish]);

    let resolver = Resolver::new(store);
    assert_eq!(resolver.resolve(Locale::English, "footer.madeWith", None), "Hecho con");
}
