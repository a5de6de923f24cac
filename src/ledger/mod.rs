//! Per-country guess tracking.
//!
//! The ledger holds exactly one [`GuessEntry`] per catalog code for the
//! lifetime of a session. It never grows or shrinks; the only mutation is
//! [`GuessLedger::mark_guessed`], and a fresh ledger is built on restart.
//!
//! # Example
//!
//! ```rust
//! use country_quiz::catalog::{Country, CountryCatalog, CountryCode};
//! use country_quiz::ledger::GuessLedger;
//!
//! let catalog: CountryCatalog = ["FR", "DE"].into_iter().map(Country::new).collect();
//! let mut ledger = GuessLedger::initialize(&catalog).unwrap();
//!
//! ledger.mark_guessed(&CountryCode::from("FR")).unwrap();
//! assert_eq!(ledger.count_guessed(), 1);
//! assert!(!ledger.is_complete(catalog.len()));
//! ```

mod entry;
mod error;

pub use entry::GuessEntry;
pub use error::LedgerError;

use crate::catalog::{Country, CountryCatalog, CountryCode};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Mapping from country code to its guess status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GuessLedger {
    entries: BTreeMap<CountryCode, GuessEntry>,
}

impl GuessLedger {
    /// Build an all-unguessed ledger from the catalog.
    ///
    /// Every duplicated code is reported at once rather than stopping at the
    /// first one.
    pub fn initialize(catalog: &CountryCatalog) -> Result<Self, LedgerError> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        let checks: Vec<Validation<(), NonEmptyVec<CountryCode>>> = catalog
            .iter()
            .map(|country| {
                let code = country.code();
                if !seen.insert(code) && reported.insert(code) {
                    Validation::fail(code.clone())
                } else {
                    Validation::success(())
                }
            })
            .collect();

        if let Validation::Failure(duplicates) = Validation::all_vec(checks) {
            return Err(LedgerError::InvalidCatalog {
                duplicates: duplicates.iter().cloned().collect(),
            });
        }

        let entries = catalog
            .iter()
            .map(|country| (country.code().clone(), GuessEntry::unguessed(country.clone())))
            .collect();

        Ok(Self { entries })
    }

    /// Flag `code` as guessed and return its country.
    ///
    /// Unknown codes are rejected without touching the ledger.
    pub fn mark_guessed(&mut self, code: &CountryCode) -> Result<&Country, LedgerError> {
        let entry = self
            .entries
            .get_mut(code)
            .ok_or_else(|| LedgerError::UnknownCountryCode(code.clone()))?;
        entry.guessed = true;
        Ok(&entry.country)
    }

    pub fn count_guessed(&self) -> usize {
        self.entries.values().filter(|entry| entry.guessed).count()
    }

    /// True once every one of `catalog_size` countries has been guessed.
    pub fn is_complete(&self, catalog_size: usize) -> bool {
        self.count_guessed() == catalog_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, code: &CountryCode) -> Option<&GuessEntry> {
        self.entries.get(code)
    }

    pub fn is_guessed(&self, code: &CountryCode) -> bool {
        self.entries.get(code).is_some_and(|entry| entry.guessed)
    }

    /// All entries ordered by code.
    pub fn entries(&self) -> impl Iterator<Item = &GuessEntry> {
        self.entries.values()
    }

    /// Countries still waiting to be guessed, ordered by code.
    pub fn remaining(&self) -> impl Iterator<Item = &Country> {
        self.entries
            .values()
            .filter(|entry| !entry.guessed)
            .map(|entry| &entry.country)
    }
}
