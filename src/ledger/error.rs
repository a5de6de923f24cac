//! Ledger error types.

use crate::catalog::CountryCode;
use thiserror::Error;

/// Errors raised by the guess ledger.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// The catalog used to build the ledger repeats one or more codes.
    #[error("Catalog contains duplicate country codes: {}", join_codes(.duplicates))]
    InvalidCatalog { duplicates: Vec<CountryCode> },

    /// A guess referenced a code the ledger does not track.
    #[error("Unknown country code '{0}'")]
    UnknownCountryCode(CountryCode),
}

fn join_codes(codes: &[CountryCode]) -> String {
    codes
        .iter()
        .map(CountryCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
