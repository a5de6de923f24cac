//! Country catalog types.
//!
//! The catalog is external data: an ordered, read-only sequence of countries
//! with a stable code and per-locale display names. Nothing in this crate
//! mutates a [`Country`] once it has been constructed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Stable unique identifier of a country (e.g. `"FR"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CountryCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Display language identifier (e.g. `"en"`, `"fr"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// A nation in the game's universe.
///
/// # Example
///
/// ```rust
/// use country_quiz::catalog::{Country, Locale};
///
/// let france = Country::new("FR")
///     .with_name("en", "France")
///     .with_name("de", "Frankreich");
///
/// assert_eq!(france.display_name(&Locale::from("de")), "Frankreich");
/// assert_eq!(france.display_name(&Locale::from("pt")), "FR");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    code: CountryCode,
    #[serde(default)]
    names: BTreeMap<Locale, String>,
}

impl Country {
    pub fn new(code: impl Into<CountryCode>) -> Self {
        Self {
            code: code.into(),
            names: BTreeMap::new(),
        }
    }

    /// Attach a display name for one locale.
    pub fn with_name(mut self, locale: impl Into<Locale>, name: impl Into<String>) -> Self {
        self.names.insert(locale.into(), name.into());
        self
    }

    pub fn code(&self) -> &CountryCode {
        &self.code
    }

    /// Name to show for `locale`, falling back to the code when the locale
    /// has no translation.
    pub fn display_name(&self, locale: &Locale) -> &str {
        self.names
            .get(locale)
            .map(String::as_str)
            .unwrap_or_else(|| self.code.as_str())
    }
}

/// Ordered, immutable list of countries shared by the ledger and the search
/// index builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryCatalog {
    countries: Arc<[Country]>,
}

impl CountryCatalog {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            countries: countries.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    pub fn as_slice(&self) -> &[Country] {
        &self.countries
    }
}

impl FromIterator<Country> for CountryCatalog {
    fn from_iter<I: IntoIterator<Item = Country>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CountryCatalog {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
