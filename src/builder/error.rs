//! Build errors for the session builder.

use crate::ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur when building a session.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Country catalog not specified. Call .catalog(countries) before .build()")]
    MissingCatalog,

    #[error("Search index builder not specified. Call .index_builder(builder) before .build()")]
    MissingIndexBuilder,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
