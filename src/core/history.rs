//! Phase transition history.
//!
//! Records every phase change of a round with its timestamp.
//! [`PhaseHistory::record`] returns a new value; the session owning a
//! history appends with [`PhaseHistory::push`].

use super::state::SessionPhase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// The phase being left
    pub from: SessionPhase,
    /// The phase being entered
    pub to: SessionPhase,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of phase transitions.
///
/// # Example
///
/// ```rust
/// use country_quiz::core::{PhaseHistory, PhaseTransition, SessionPhase};
/// use chrono::Utc;
///
/// let history = PhaseHistory::new().record(PhaseTransition {
///     from: SessionPhase::initial(),
///     to: SessionPhase::Active { ends_at: None },
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseHistory {
    transitions: Vec<PhaseTransition>,
}

impl PhaseHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: PhaseTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place.
    pub fn push(&mut self, transition: PhaseTransition) {
        self.transitions.push(transition);
    }

    /// Phases traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&SessionPhase> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            last.timestamp.signed_duration_since(first.timestamp).to_std().ok()
        } else {
            None
        }
    }

    /// Time from the most recent entry into `Active` to the following
    /// transition into `Ending` or `Ended`.
    ///
    /// `None` while the round is still running or if no round was started.
    pub fn round_duration(&self) -> Option<Duration> {
        let start = self
            .transitions
            .iter()
            .rposition(|t| t.to.is_active())?;
        let started_at = self.transitions[start].timestamp;

        self.transitions[start + 1..]
            .iter()
            .find(|t| matches!(t.to, SessionPhase::Ending | SessionPhase::Ended))
            .and_then(|t| t.timestamp.signed_duration_since(started_at).to_std().ok())
    }

    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
