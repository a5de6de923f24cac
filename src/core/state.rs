//! Session phases and the UI flags derived from them.
//!
//! The phase is the single source of truth for the visible lifecycle of a
//! round. The individual booleans a UI binds to are computed from it by
//! [`PhaseFlags`], so contradictory combinations (results open while the
//! controls are showing, for instance) cannot be represented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutually exclusive lifecycle state of a session.
///
/// # Example
///
/// ```rust
/// use country_quiz::core::{PhaseFlags, SessionPhase};
///
/// let phase = SessionPhase::Active { ends_at: None };
/// let flags = PhaseFlags::from(&phase);
///
/// assert!(flags.is_showing_controls);
/// assert!(!flags.is_results_dialog_open);
/// assert_eq!(phase.name(), "Active");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Before the first round, or after a restart.
    PreGame { start_modal_open: bool },
    /// Round in progress. `ends_at` is `None` in untimed mode.
    Active { ends_at: Option<DateTime<Utc>> },
    /// Countdown reached zero and the UI is animating the counter.
    Ending,
    /// Results are visible.
    Ended,
    /// The player is being asked to confirm a restart.
    RestartConfirm,
}

impl SessionPhase {
    /// Phase of a freshly constructed session.
    pub fn initial() -> Self {
        Self::PreGame {
            start_modal_open: false,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::PreGame { .. } => "PreGame",
            Self::Active { .. } => "Active",
            Self::Ending => "Ending",
            Self::Ended => "Ended",
            Self::RestartConfirm => "RestartConfirm",
        }
    }

    /// Deadline of the running countdown, if any.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active { ends_at } => *ends_at,
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::initial()
    }
}

/// Discrete booleans for UI bindings, derived from a [`SessionPhase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PhaseFlags {
    pub ends_at: Option<DateTime<Utc>>,
    pub is_start_game_modal_open: bool,
    pub is_showing_controls: bool,
    pub is_results_dialog_open: bool,
    pub is_game_restart_confirmation_open: bool,
    pub is_counter_finishing: bool,
}

impl PhaseFlags {
    const CLOSED: Self = Self {
        ends_at: None,
        is_start_game_modal_open: false,
        is_showing_controls: false,
        is_results_dialog_open: false,
        is_game_restart_confirmation_open: false,
        is_counter_finishing: false,
    };
}

impl From<&SessionPhase> for PhaseFlags {
    fn from(phase: &SessionPhase) -> Self {
        match phase {
            SessionPhase::PreGame { start_modal_open } => Self {
                is_start_game_modal_open: *start_modal_open,
                ..Self::CLOSED
            },
            SessionPhase::Active { ends_at } => Self {
                ends_at: *ends_at,
                is_showing_controls: true,
                ..Self::CLOSED
            },
            SessionPhase::Ending => Self {
                is_showing_controls: true,
                is_counter_finishing: true,
                ..Self::CLOSED
            },
            SessionPhase::Ended => Self {
                is_results_dialog_open: true,
                ..Self::CLOSED
            },
            SessionPhase::RestartConfirm => Self {
                is_game_restart_confirmation_open: true,
                ..Self::CLOSED
            },
        }
    }
}
