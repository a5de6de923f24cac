//! Core phase types and logic.
//!
//! This module contains the pure part of the session state machine:
//! - The [`SessionPhase`] enum and its derived [`PhaseFlags`]
//! - [`Guard`] predicates saying which operations each phase accepts
//! - Immutable [`PhaseHistory`] tracking
//!
//! Nothing here performs I/O or reads the clock.

mod guard;
mod history;
mod state;

pub use guard::{Guard, Operation};
pub use history::{PhaseHistory, PhaseTransition};
pub use state::{PhaseFlags, SessionPhase};
