//! Property tests for resolution termination and the fallback chain.

use folio_i18n::{Locale, Resolver, ResolverOptions, TranslationStore};
use proptest::prelude::*;

fn quiet_resolver() -> Resolver {
    let store = TranslationStore::builder()
        .json(
            Locale::Spanish,
            r#"{ "a": { "b": "uno", "c": { "d": "dos" } }, "solo": "español" }"#,
        )
        .unwrap()
        .json(Locale::English, r#"{ "a": { "b": "one" } }"#)
        .unwrap()
        .build();
    Resolver::with_options(
        store,
        ResolverOptions {
            warn_missing: false,
            record_metrics: false,
        },
    )
}

fn locale_strategy() -> impl Strategy<Value = Locale> {
    prop_oneof![Just(Locale::Spanish), Just(Locale::English)]
}

proptest! {
    #[test]
    fn unknown_keys_fall_back_to_fallback_or_key(
        locale in locale_strategy(),
        key in "zz[a-z]{1,6}(\\.[a-z]{1,6}){0,3}",
        fallback in proptest::option::of("[A-Za-z ]{1,12}"),
    ) {
        let resolver = quiet_resolver();
        let resolved = resolver.resolve(locale, &key, fallback.as_deref());
        match fallback {
            Some(text) => prop_assert_eq!(resolved, text),
            None => prop_assert_eq!(resolved, key),
        }
    }

    #[test]
    fn resolution_is_stable_across_cache_clears(
        locale in locale_strategy(),
        key in prop_oneof![Just("a.b"), Just("a.c.d"), Just("solo"), Just("a"), Just("missing.key")],
    ) {
        let resolver = quiet_resolver();
        let first = resolver.resolve(locale, key, None);
        let cached = resolver.resolve(locale, key, None);
        resolver.clear_cache();
        let fresh = resolver.resolve(locale, key, None);
        prop_assert_eq!(&first, &cached);
        prop_assert_eq!(&first, &fresh);
        prop_assert!(!first.is_empty());
    }
}

#[test]
fn default_only_keys_come_from_default_locale() {
    let resolver = quiet_resolver();
    assert_eq!(resolver.resolve(Locale::English, "a.c.d", None), "dos");
    assert_eq!(resolver.resolve(Locale::English, "solo", Some("X")), "español");
    assert_eq!(resolver.resolve(Locale::English, "a.b", None), "one");
}
