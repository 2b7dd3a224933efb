//! Checks that every locale ships the keys the site renders.

use folio_i18n::{Locale, Resolver, ResolverOptions, TranslationStore};

const RENDERED_KEYS: &[&str] = &[
    "navigation.home",
    "navigation.projects",
    "navigation.contact",
    "navigation.switchLanguage",
    "hero.greeting",
    "hero.downloadCV",
    "timeline.title",
    "projects.title",
    "projects.viewProject",
    "projects.viewCode",
    "projects.retry",
    "contact.modal.title",
    "contact.modal.form.submit",
    "contact.modal.validation.nameRequired",
    "contact.modal.validation.emailRequired",
    "contact.modal.validation.emailInvalid",
    "contact.modal.validation.subjectRequired",
    "contact.modal.validation.messageRequired",
    "contact.modal.validation.messageMinLength",
    "contact.modal.status.success.title",
    "contact.modal.status.error.description",
    "contact.modal.status.configError",
    "theme.toggle",
    "footer.madeWith",
];

#[test]
fn test_all_locales_have_the_same_keys() {
    let store = TranslationStore::embedded().unwrap();
    let reference = store.dictionary(Locale::DEFAULT).unwrap().leaf_keys();

    for locale in Locale::all() {
        let keys = store.dictionary(locale).unwrap().leaf_keys();
        assert_eq!(keys, reference, "key set of {locale} differs from {}", Locale::DEFAULT);
    }
}

#[test]
fn test_rendered_keys_resolve_in_every_locale() {
    let store = TranslationStore::embedded().unwrap();
    for locale in Locale::all() {
        for key in RENDERED_KEYS {
            let text = store.dictionary(locale).unwrap().lookup(key).text();
            assert!(
                text.is_some_and(|t| !t.is_empty()),
                "Message '{key}' not found in locale {locale}"
            );
        }
    }
}

#[test]
fn test_every_default_key_is_non_empty_everywhere() {
    let store = TranslationStore::embedded().unwrap();
    let keys = store.dictionary(Locale::DEFAULT).unwrap().leaf_keys();
    let resolver = Resolver::with_options(
        store,
        ResolverOptions {
            warn_missing: true,
            record_metrics: false,
        },
    );

    for locale in Locale::all() {
        for key in &keys {
            assert!(!resolver.resolve(locale, key, None).is_empty(), "{locale}:{key} is empty");
        }
    }
    assert_eq!(resolver.metrics().lookups, 0);
}
