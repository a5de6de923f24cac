//! Session error types.

use crate::core::Operation;
use crate::ledger::LedgerError;
use thiserror::Error;

/// Errors returned by session operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Operation '{operation}' is not allowed in phase '{phase}'")]
    InvalidPhaseTransition { operation: Operation, phase: String },

    #[error("Countdown of {seconds}s is out of range")]
    InvalidDuration { seconds: u64 },
}
