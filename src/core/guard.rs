//! Guard predicates for controlling phase transitions.
//!
//! Every controller operation has a [`Guard`] describing the phases it may
//! run from. Guards are pure: they inspect the phase and nothing else.

use super::state::SessionPhase;
use serde::Serialize;
use std::fmt;

/// Pure predicate that determines if an operation may run from a phase.
///
/// # Example
///
/// ```rust
/// use country_quiz::core::{Guard, SessionPhase};
///
/// let only_active = Guard::new(SessionPhase::is_active);
///
/// assert!(only_active.check(&SessionPhase::Active { ends_at: None }));
/// assert!(!only_active.check(&SessionPhase::Ended));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&SessionPhase) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&SessionPhase) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that accepts every phase.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    pub fn check(&self, phase: &SessionPhase) -> bool {
        (self.predicate)(phase)
    }
}

/// Lifecycle operations exposed by the session controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    StartGame,
    GuessCountry,
    BeginFinishing,
    EndGame,
    OpenRestartConfirmation,
    CancelRestartConfirmation,
    RestartGame,
    ToggleStartModal,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartGame => "start_game",
            Self::GuessCountry => "guess_country",
            Self::BeginFinishing => "begin_finishing",
            Self::EndGame => "end_game",
            Self::OpenRestartConfirmation => "open_restart_confirmation",
            Self::CancelRestartConfirmation => "cancel_restart_confirmation",
            Self::RestartGame => "restart_game",
            Self::ToggleStartModal => "toggle_start_modal",
        }
    }

    /// Phases this operation may run from.
    pub fn guard(&self) -> Guard {
        match self {
            // Starting and restarting are accepted anywhere; re-entering
            // Active simply recomputes the deadline and the index.
            Self::StartGame | Self::RestartGame => Guard::always(),
            Self::GuessCountry | Self::BeginFinishing => Guard::new(SessionPhase::is_active),
            Self::EndGame => {
                Guard::new(|p| matches!(p, SessionPhase::Active { .. } | SessionPhase::Ending))
            }
            // Only offered from the results, so cancelling returns there.
            Self::OpenRestartConfirmation => Guard::new(|p| matches!(p, SessionPhase::Ended)),
            Self::CancelRestartConfirmation => {
                Guard::new(|p| matches!(p, SessionPhase::RestartConfirm))
            }
            Self::ToggleStartModal => Guard::new(|p| matches!(p, SessionPhase::PreGame { .. })),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
