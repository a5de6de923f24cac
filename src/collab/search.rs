//! Search index construction contract.

use crate::catalog::{CountryCatalog, Locale};

/// Builds the prefix-lookup structure used to match typed country names.
///
/// The produced index is opaque to the session: it is stored, handed out by
/// reference and replaced wholesale on the next build.
///
/// # Example
///
/// ```rust
/// use country_quiz::catalog::{Country, CountryCatalog, Locale};
/// use country_quiz::collab::SearchIndexBuilder;
/// use std::collections::BTreeMap;
///
/// struct NameMap;
///
/// impl SearchIndexBuilder for NameMap {
///     type Index = BTreeMap<String, String>;
///
///     fn build(&self, catalog: &CountryCatalog, locale: &Locale) -> Self::Index {
///         catalog
///             .iter()
///             .map(|c| (c.display_name(locale).to_lowercase(), c.code().to_string()))
///             .collect()
///     }
/// }
///
/// let catalog = CountryCatalog::new(vec![Country::new("FR").with_name("en", "France")]);
/// let index = NameMap.build(&catalog, &Locale::from("en"));
/// assert_eq!(index.get("france").map(String::as_str), Some("FR"));
/// ```
pub trait SearchIndexBuilder {
    type Index;

    fn build(&self, catalog: &CountryCatalog, locale: &Locale) -> Self::Index;
}
