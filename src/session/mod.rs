//! Game session lifecycle.
//!
//! [`SessionController`] is a plain owned value: the application builds one
//! and hands it, or a [`SharedSession`] when a background timer is involved,
//! to whatever needs it.
//!
//! # Phase transitions
//!
//! ```text
//! PreGame --start_game--> Active --begin_finishing--> Ending
//!                           |                           |
//!                           +--------on_game_end--------+--> Ended
//! Ended --open_restart_confirmation--> RestartConfirm
//! RestartConfirm --cancel_restart_confirmation--> Ended
//! any --on_restart_game--> PreGame (start modal open)
//! ```

mod controller;
mod error;

pub use controller::SessionController;
pub use error::SessionError;

use parking_lot::Mutex;
use std::sync::Arc;

/// Session shared between the UI and a timer task.
///
/// All mutation goes through the one mutex.
pub type SharedSession<B> = Arc<Mutex<SessionController<B>>>;

/// Wrap a session for sharing across tasks.
pub fn share<B: crate::collab::SearchIndexBuilder>(
    session: SessionController<B>,
) -> SharedSession<B> {
    Arc::new(Mutex::new(session))
}
