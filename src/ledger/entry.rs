//! A single row of the guess ledger.

use crate::catalog::Country;
use serde::{Deserialize, Serialize};

/// Guess status of one country.
///
/// `guessed` only ever moves from `false` to `true` within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessEntry {
    pub country: Country,
    pub guessed: bool,
}

impl GuessEntry {
    pub fn unguessed(country: Country) -> Self {
        Self {
            country,
            guessed: false,
        }
    }
}
