//! Active display language.

use crate::catalog::Locale;
use parking_lot::RwLock;
use std::sync::Arc;

/// Reports the display language selected right now.
///
/// The session reads it when a round starts; it never writes it.
pub trait LocaleProvider: Send + Sync {
    fn active_locale(&self) -> Locale;
}

/// A locale that never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedLocale(pub Locale);

impl LocaleProvider for FixedLocale {
    fn active_locale(&self) -> Locale {
        self.0.clone()
    }
}

/// A locale the UI can switch at runtime. Clones share the same value.
///
/// # Example
///
/// ```rust
/// use country_quiz::catalog::Locale;
/// use country_quiz::collab::{LocaleProvider, SharedLocale};
///
/// let locale = SharedLocale::new(Locale::from("en"));
/// let handle = locale.clone();
/// handle.set(Locale::from("fr"));
///
/// assert_eq!(locale.active_locale(), Locale::from("fr"));
/// ```
#[derive(Clone, Debug)]
pub struct SharedLocale {
    current: Arc<RwLock<Locale>>,
}

impl SharedLocale {
    pub fn new(locale: Locale) -> Self {
        Self {
            current: Arc::new(RwLock::new(locale)),
        }
    }

    pub fn set(&self, locale: Locale) {
        *self.current.write() = locale;
    }
}

impl LocaleProvider for SharedLocale {
    fn active_locale(&self) -> Locale {
        self.current.read().clone()
    }
}
