//! Background countdown watcher.
//!
//! The session never schedules anything itself. This watcher polls a
//! [`SharedSession`] on a fixed interval and ends the round once its
//! deadline has passed. It is never cancelled: every tick re-reads the
//! deadline, and a session without one is simply left alone, so a restart
//! or an early finish needs no coordination with the watcher.

use crate::collab::SearchIndexBuilder;
use crate::session::SharedSession;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Why [`watch`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The deadline passed and the watcher ended the game.
    Expired,
    /// The session no longer had a deadline to wait for.
    NoDeadline,
}

/// Shortest polling period; a zero `period` is raised to this.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Poll `session` every `period` until its countdown expires or disappears.
///
/// # Example
///
/// ```rust,no_run
/// # use country_quiz::countdown::watch;
/// # use country_quiz::session::SharedSession;
/// # use country_quiz::collab::SearchIndexBuilder;
/// # async fn run<B: SearchIndexBuilder + Send + 'static>(session: SharedSession<B>)
/// # where B::Index: Send {
/// let period = session.lock().settings().tick_interval();
/// tokio::spawn(watch(session, period));
/// # }
/// ```
pub async fn watch<B>(session: SharedSession<B>, period: Duration) -> WatchOutcome
where
    B: SearchIndexBuilder,
{
    let mut ticker = interval(period.max(MIN_PERIOD));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut guard = session.lock();
        if guard.ends_at().is_none() {
            debug!("countdown watcher stopping: no deadline");
            return WatchOutcome::NoDeadline;
        }
        let now = guard.now();
        if guard.tick(now) {
            info!("countdown expired");
            return WatchOutcome::Expired;
        }
    }
}
