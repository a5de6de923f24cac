//! Builder API for assembling a session from its collaborators.
//!
//! The catalog and the search index builder are required. The clock
//! defaults to [`SystemClock`], the locale to a fixed copy of the settings'
//! startup locale, and the settings to [`GameSettings::default`].
//!
//! # Example
//!
//! ```
//! use country_quiz::builder::SessionBuilder;
//! use country_quiz::catalog::{Country, CountryCatalog, Locale};
//! use country_quiz::collab::SearchIndexBuilder;
//!
//! struct Names;
//!
//! impl SearchIndexBuilder for Names {
//!     type Index = Vec<String>;
//!
//!     fn build(&self, catalog: &CountryCatalog, locale: &Locale) -> Vec<String> {
//!         catalog.iter().map(|c| c.display_name(locale).to_string()).collect()
//!     }
//! }
//!
//! let session = SessionBuilder::new()
//!     .catalog(vec![Country::new("FR").with_name("en", "France")])
//!     .index_builder(Names)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(session.search_index(), &vec!["France".to_string()]);
//! ```

pub mod error;

pub use error::BuildError;

use crate::catalog::{Country, CountryCatalog};
use crate::collab::{Clock, FixedLocale, LocaleProvider, SearchIndexBuilder, SystemClock};
use crate::session::SessionController;
use crate::settings::GameSettings;
use std::sync::Arc;

/// Builder for constructing sessions with a fluent API.
pub struct SessionBuilder<B: SearchIndexBuilder> {
    catalog: Option<CountryCatalog>,
    index_builder: Option<B>,
    clock: Option<Arc<dyn Clock>>,
    locale: Option<Arc<dyn LocaleProvider>>,
    settings: GameSettings,
}

impl<B: SearchIndexBuilder> SessionBuilder<B> {
    pub fn new() -> Self {
        Self {
            catalog: None,
            index_builder: None,
            clock: None,
            locale: None,
            settings: GameSettings::default(),
        }
    }

    /// Set the country catalog (required).
    pub fn catalog(mut self, countries: impl Into<CatalogSource>) -> Self {
        self.catalog = Some(countries.into().0);
        self
    }

    /// Set the search index builder (required).
    pub fn index_builder(mut self, builder: B) -> Self {
        self.index_builder = Some(builder);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        self.clock = Some(clock);
        self
    }

    pub fn locale(mut self, locale: impl LocaleProvider + 'static) -> Self {
        let locale: Arc<dyn LocaleProvider> = Arc::new(locale);
        self.locale = Some(locale);
        self
    }

    pub fn settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the session.
    /// Returns an error if a required part is missing or the catalog is
    /// malformed.
    pub fn build(self) -> Result<SessionController<B>, BuildError> {
        let catalog = self.catalog.ok_or(BuildError::MissingCatalog)?;
        let index_builder = self.index_builder.ok_or(BuildError::MissingIndexBuilder)?;

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let locale: Arc<dyn LocaleProvider> = match self.locale {
            Some(locale) => locale,
            None => Arc::new(FixedLocale(self.settings.startup_locale.clone())),
        };

        Ok(SessionController::new(
            catalog,
            index_builder,
            clock,
            locale,
            self.settings,
        )?)
    }
}

impl<B: SearchIndexBuilder> Default for SessionBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that can serve as the catalog: a [`CountryCatalog`] or a plain
/// list of countries.
pub struct CatalogSource(CountryCatalog);

impl From<CountryCatalog> for CatalogSource {
    fn from(catalog: CountryCatalog) -> Self {
        Self(catalog)
    }
}

impl From<Vec<Country>> for CatalogSource {
    fn from(countries: Vec<Country>) -> Self {
        Self(CountryCatalog::new(countries))
    }
}
