//! Scoped access to the language state for deeply nested consumers
//!
//! The embedding context enters a [`LanguageScope`] once; anything running on
//! the same thread inside that scope can reach the holder through
//! [`use_language`]. Reaching for it outside a scope is an integration bug
//! and panics.

use crate::error::{I18nError, I18nResult};
use crate::state::LanguageState;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static SCOPES: RefCell<Vec<Arc<LanguageState>>> = const { RefCell::new(Vec::new()) };
}

/// Entry point for installing a language state on the current thread
pub struct LanguageScope;

impl LanguageScope {
    /// Make `state` the innermost active scope until the guard drops
    pub fn enter(state: Arc<LanguageState>) -> ScopeGuard {
        SCOPES.with(|scopes| scopes.borrow_mut().push(state));
        ScopeGuard {
            _not_send: PhantomData,
        }
    }

    /// Run `f` with `state` installed
    pub fn run<R>(state: Arc<LanguageState>, f: impl FnOnce() -> R) -> R {
        let _guard = Self::enter(state);
        f()
    }

    /// Whether any scope is active on this thread
    pub fn is_active() -> bool {
        SCOPES.with(|scopes| !scopes.borrow().is_empty())
    }
}

/// Keeps a scope active; scopes must be exited on the thread that entered them
#[must_use = "the scope ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| {
            scopes.borrow_mut().pop();
        });
    }
}

/// The innermost active language state
///
/// # Panics
///
/// Panics when called outside of a [`LanguageScope`].
pub fn use_language() -> Arc<LanguageState> {
    match try_use_language() {
        Ok(state) => state,
        Err(_) => panic!("use_language must be called within a LanguageScope"),
    }
}

/// The innermost active language state, or [`I18nError::OutsideScope`]
pub fn try_use_language() -> I18nResult<Arc<LanguageState>> {
    SCOPES.with(|scopes| scopes.borrow().last().cloned().ok_or(I18nError::OutsideScope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolver;
    use crate::storage::MemoryStorage;
    use crate::store::TranslationStore;
    use crate::Locale;

    fn state(locale: Locale) -> Arc<LanguageState> {
        let resolver = Arc::new(Resolver::new(TranslationStore::embedded().unwrap()));
        LanguageState::new(resolver, Arc::new(MemoryStorage::new()), Some(locale))
    }

    #[test]
    #[should_panic(expected = "use_language must be called within a LanguageScope")]
    fn test_use_outside_scope_panics() {
        let _ = use_language();
    }

    #[test]
    fn test_try_use_outside_scope_errors() {
        assert!(matches!(try_use_language(), Err(I18nError::OutsideScope)));
        assert!(!LanguageScope::is_active());
    }

    #[test]
    fn test_scopes_nest_and_unwind() {
        let outer = state(Locale::Spanish);
        let inner = state(Locale::English);

        let _outer_guard = LanguageScope::enter(outer);
        assert_eq!(use_language().current_locale(), Locale::Spanish);

        LanguageScope::run(inner, || {
            assert_eq!(use_language().t("navigation.home"), "Home");
        });

        assert_eq!(use_language().current_locale(), Locale::Spanish);
    }

    #[test]
    fn test_scope_ends_with_guard() {
        {
            let _guard = LanguageScope::enter(state(Locale::English));
            assert!(LanguageScope::is_active());
        }
        assert!(!LanguageScope::is_active());
    }
}
