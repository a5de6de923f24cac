//! Session controller: owns the phase, the deadline, the search index and
//! the guess ledger of one player's game.

use crate::catalog::{Country, CountryCatalog, CountryCode, Locale};
use crate::collab::{Clock, LocaleProvider, SearchIndexBuilder};
use crate::core::{Operation, PhaseFlags, PhaseHistory, PhaseTransition, SessionPhase};
use crate::ledger::{GuessLedger, LedgerError};
use crate::session::error::SessionError;
use crate::settings::GameSettings;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Finite state machine over the visible lifecycle of a game.
pub struct SessionController<B: SearchIndexBuilder> {
    catalog: CountryCatalog,
    ledger: GuessLedger,
    phase: SessionPhase,
    latest_guess: Option<Country>,
    history: PhaseHistory,
    index_builder: B,
    index: B::Index,
    index_locale: Locale,
    clock: Arc<dyn Clock>,
    locale: Arc<dyn LocaleProvider>,
    settings: GameSettings,
}

impl<B: SearchIndexBuilder> SessionController<B> {
    /// Create a session in `PreGame` with a fresh ledger and an index built
    /// for the configured startup locale.
    pub fn new(
        catalog: CountryCatalog,
        index_builder: B,
        clock: Arc<dyn Clock>,
        locale: Arc<dyn LocaleProvider>,
        settings: GameSettings,
    ) -> Result<Self, LedgerError> {
        let ledger = GuessLedger::initialize(&catalog)?;
        let index_locale = settings.startup_locale.clone();
        let index = index_builder.build(&catalog, &index_locale);

        debug!(
            countries = catalog.len(),
            locale = %index_locale,
            "session created"
        );

        Ok(Self {
            catalog,
            ledger,
            phase: SessionPhase::initial(),
            latest_guess: None,
            history: PhaseHistory::new(),
            index_builder,
            index,
            index_locale,
            clock,
            locale,
            settings,
        })
    }

    /// Begin a round.
    ///
    /// `Some(n)` with `n > 0` sets a deadline `n` seconds from now; `None`
    /// or zero runs untimed. The search index is rebuilt for the locale
    /// active at this moment. The ledger is left as it is; the phase history
    /// restarts with this round.
    pub fn start_game(&mut self, duration_seconds: Option<u64>) -> Result<(), SessionError> {
        self.ensure(Operation::StartGame)?;

        let now = self.clock.now();
        let ends_at = match duration_seconds {
            Some(seconds) if seconds > 0 => Some(deadline(now, seconds)?),
            _ => None,
        };

        let locale = self.locale.active_locale();
        self.index = self.index_builder.build(&self.catalog, &locale);
        debug!(locale = %locale, "search index rebuilt");
        self.index_locale = locale;

        self.history = PhaseHistory::new();
        self.enter(SessionPhase::Active { ends_at }, now);
        info!(ends_at = ?ends_at, locale = %self.index_locale, "game started");
        Ok(())
    }

    /// Begin a round with the configured default countdown.
    pub fn start_default_game(&mut self) -> Result<(), SessionError> {
        self.start_game(self.settings.default_duration())
    }

    /// Record a correct guess.
    ///
    /// Only valid while the round is active. Unknown codes are surfaced as
    /// [`LedgerError::UnknownCountryCode`](crate::ledger::LedgerError) and
    /// leave the session untouched.
    pub fn on_guess_country(&mut self, code: &CountryCode) -> Result<(), SessionError> {
        self.ensure(Operation::GuessCountry)?;

        let country = self.ledger.mark_guessed(code).map_err(|err| {
            warn!(code = %code, "guess rejected: {err}");
            err
        })?;
        self.latest_guess = Some(country.clone());

        debug!(
            code = %code,
            guessed = self.number_countries_guessed(),
            total = self.catalog_size(),
            "country guessed"
        );
        Ok(())
    }

    /// Countdown reached zero; the UI animates the counter before results.
    pub fn begin_finishing(&mut self) -> Result<(), SessionError> {
        self.ensure(Operation::BeginFinishing)?;
        let now = self.clock.now();
        self.enter(SessionPhase::Ending, now);
        debug!("countdown finishing");
        Ok(())
    }

    /// Close the round and show results.
    pub fn on_game_end(&mut self) -> Result<(), SessionError> {
        self.ensure(Operation::EndGame)?;
        let now = self.clock.now();
        self.enter(SessionPhase::Ended, now);
        info!(
            guessed = self.number_countries_guessed(),
            total = self.catalog_size(),
            "game ended"
        );
        Ok(())
    }

    /// Ask the player to confirm a restart.
    pub fn open_restart_confirmation(&mut self) -> Result<(), SessionError> {
        self.ensure(Operation::OpenRestartConfirmation)?;
        let now = self.clock.now();
        self.enter(SessionPhase::RestartConfirm, now);
        Ok(())
    }

    /// Dismiss the restart prompt and return to the results.
    pub fn cancel_restart_confirmation(&mut self) -> Result<(), SessionError> {
        self.ensure(Operation::CancelRestartConfirmation)?;
        let now = self.clock.now();
        self.enter(SessionPhase::Ended, now);
        Ok(())
    }

    /// Reset everything and reopen the start modal.
    ///
    /// Recreates the ledger, clears the latest guess and the phase history.
    pub fn on_restart_game(&mut self) -> Result<(), SessionError> {
        self.ensure(Operation::RestartGame)?;

        self.ledger = GuessLedger::initialize(&self.catalog)?;
        self.latest_guess = None;
        self.history = PhaseHistory::new();

        let now = self.clock.now();
        self.enter(
            SessionPhase::PreGame {
                start_modal_open: true,
            },
            now,
        );
        info!("game restarted");
        Ok(())
    }

    pub fn open_start_modal(&mut self) -> Result<(), SessionError> {
        self.set_start_modal(true)
    }

    pub fn close_start_modal(&mut self) -> Result<(), SessionError> {
        self.set_start_modal(false)
    }

    /// End the round if its deadline has passed at `now`.
    ///
    /// Returns `true` when this call ended the game. Untimed rounds and
    /// non-active phases are left alone.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let expired = self.phase.ends_at().is_some_and(|deadline| deadline <= now);
        expired && self.on_game_end().is_ok()
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining_time(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        self.phase
            .ends_at()
            .map(|deadline| (deadline - now).to_std().unwrap_or_default())
    }

    pub fn number_countries_guessed(&self) -> usize {
        self.ledger.count_guessed()
    }

    /// True once every country in the catalog has been guessed.
    pub fn has_guessed_countries(&self) -> bool {
        self.ledger.is_complete(self.catalog_size())
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &GuessLedger {
        &self.ledger
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn flags(&self) -> PhaseFlags {
        PhaseFlags::from(&self.phase)
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.phase.ends_at()
    }

    pub fn latest_guess(&self) -> Option<&Country> {
        self.latest_guess.as_ref()
    }

    pub fn search_index(&self) -> &B::Index {
        &self.index
    }

    /// Locale the current search index was built for.
    pub fn index_locale(&self) -> &Locale {
        &self.index_locale
    }

    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    /// Length of the last finished round.
    pub fn round_duration(&self) -> Option<std::time::Duration> {
        self.history.round_duration()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn set_start_modal(&mut self, open: bool) -> Result<(), SessionError> {
        self.ensure(Operation::ToggleStartModal)?;
        let now = self.clock.now();
        self.enter(
            SessionPhase::PreGame {
                start_modal_open: open,
            },
            now,
        );
        Ok(())
    }

    fn ensure(&self, operation: Operation) -> Result<(), SessionError> {
        if operation.guard().check(&self.phase) {
            return Ok(());
        }
        warn!(
            operation = %operation,
            phase = self.phase.name(),
            "operation rejected"
        );
        Err(SessionError::InvalidPhaseTransition {
            operation,
            phase: self.phase.name().to_string(),
        })
    }

    fn enter(&mut self, to: SessionPhase, timestamp: DateTime<Utc>) {
        let from = std::mem::replace(&mut self.phase, to.clone());
        self.history.push(PhaseTransition {
            from,
            to,
            timestamp,
        });
    }
}

fn deadline(now: DateTime<Utc>, seconds: u64) -> Result<DateTime<Utc>, SessionError> {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or(SessionError::InvalidDuration { seconds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{FixedLocale, ManualClock, SharedLocale};
    use std::cell::Cell;

    /// Index stand-in recording the locale it was built for.
    #[derive(Default)]
    struct RecordingBuilder {
        builds: Cell<usize>,
    }

    #[derive(Debug, PartialEq)]
    struct StubIndex {
        locale: Locale,
        entries: usize,
        build: usize,
    }

    impl SearchIndexBuilder for RecordingBuilder {
        type Index = StubIndex;

        fn build(&self, catalog: &CountryCatalog, locale: &Locale) -> StubIndex {
            self.builds.set(self.builds.get() + 1);
            StubIndex {
                locale: locale.clone(),
                entries: catalog.len(),
                build: self.builds.get(),
            }
        }
    }

    fn catalog() -> CountryCatalog {
        ["FR", "DE", "IT"].into_iter().map(Country::new).collect()
    }

    fn session_with(
        clock: &ManualClock,
        locale: Arc<dyn LocaleProvider>,
    ) -> SessionController<RecordingBuilder> {
        SessionController::new(
            catalog(),
            RecordingBuilder::default(),
            Arc::new(clock.clone()),
            locale,
            GameSettings::default(),
        )
        .unwrap()
    }

    fn session(clock: &ManualClock) -> SessionController<RecordingBuilder> {
        session_with(clock, Arc::new(FixedLocale(Locale::from("en"))))
    }

    fn code(raw: &str) -> CountryCode {
        CountryCode::from(raw)
    }

    #[test]
    fn new_session_starts_in_pregame() {
        let clock = ManualClock::default();
        let session = session(&clock);

        assert_eq!(session.phase(), &SessionPhase::initial());
        assert_eq!(session.number_countries_guessed(), 0);
        assert!(session.latest_guess().is_none());
        assert_eq!(session.search_index().locale, Locale::from("en"));
        assert_eq!(session.search_index().entries, 3);
        assert!(session.history().is_empty());
    }

    #[test]
    fn duplicate_catalog_fails_construction() {
        let catalog: CountryCatalog = ["FR", "FR"].into_iter().map(Country::new).collect();
        let result = SessionController::new(
            catalog,
            RecordingBuilder::default(),
            Arc::new(ManualClock::default()),
            Arc::new(FixedLocale(Locale::from("en"))),
            GameSettings::default(),
        );

        assert!(matches!(result, Err(LedgerError::InvalidCatalog { .. })));
    }

    #[test]
    fn start_game_sets_deadline_and_shows_controls() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        session.start_game(Some(5)).unwrap();

        let flags = session.flags();
        assert_eq!(flags.ends_at, Some(clock.now() + Duration::seconds(5)));
        assert!(flags.is_showing_controls);
        assert!(!flags.is_counter_finishing);
        assert!(!flags.is_start_game_modal_open);
    }

    #[test]
    fn start_game_without_duration_is_untimed() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        session.start_game(None).unwrap();
        assert!(session.phase().is_active());
        assert_eq!(session.ends_at(), None);

        session.start_game(Some(0)).unwrap();
        assert_eq!(session.ends_at(), None);
    }

    #[test]
    fn start_default_game_uses_settings() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        session.start_default_game().unwrap();

        assert_eq!(session.ends_at(), Some(clock.now() + Duration::seconds(5)));
    }

    #[test]
    fn oversized_duration_is_rejected() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        let result = session.start_game(Some(u64::MAX));

        assert_eq!(
            result,
            Err(SessionError::InvalidDuration { seconds: u64::MAX })
        );
        assert_eq!(session.phase(), &SessionPhase::initial());
    }

    #[test]
    fn start_game_rebuilds_index_for_active_locale() {
        let clock = ManualClock::default();
        let locale = SharedLocale::new(Locale::from("en"));
        let mut session = session_with(&clock, Arc::new(locale.clone()));

        locale.set(Locale::from("fr"));
        session.start_game(Some(5)).unwrap();

        assert_eq!(session.search_index().locale, Locale::from("fr"));
        assert_eq!(session.index_locale(), &Locale::from("fr"));
        assert_eq!(session.search_index().build, 2);
    }

    #[test]
    fn locale_change_mid_round_waits_for_next_start() {
        let clock = ManualClock::default();
        let locale = SharedLocale::new(Locale::from("en"));
        let mut session = session_with(&clock, Arc::new(locale.clone()));

        session.start_game(Some(60)).unwrap();
        locale.set(Locale::from("de"));
        session.on_guess_country(&code("FR")).unwrap();

        assert_eq!(session.search_index().locale, Locale::from("en"));
    }

    #[test]
    fn restarting_twice_recomputes_deadline() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        session.start_game(Some(5)).unwrap();
        clock.advance(Duration::seconds(2));
        session.start_game(Some(5)).unwrap();

        assert_eq!(session.ends_at(), Some(clock.now() + Duration::seconds(5)));
    }

    #[test]
    fn start_game_keeps_ledger() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        session.start_game(None).unwrap();
        session.on_guess_country(&code("IT")).unwrap();
        session.start_game(None).unwrap();

        assert_eq!(session.number_countries_guessed(), 1);
    }

    #[test]
    fn guess_updates_ledger_and_latest() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(5)).unwrap();

        session.on_guess_country(&code("FR")).unwrap();
        session.on_guess_country(&code("DE")).unwrap();

        assert_eq!(session.number_countries_guessed(), 2);
        assert_eq!(session.latest_guess().map(Country::code), Some(&code("DE")));
        assert!(session.phase().is_active());
    }

    #[test]
    fn unknown_guess_propagates_and_leaves_state() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(5)).unwrap();
        session.on_guess_country(&code("FR")).unwrap();
        let ledger_before = session.ledger().clone();

        let result = session.on_guess_country(&code("ZZ"));

        assert_eq!(
            result,
            Err(SessionError::Ledger(LedgerError::UnknownCountryCode(code(
                "ZZ"
            ))))
        );
        assert_eq!(session.ledger(), &ledger_before);
        assert_eq!(session.latest_guess().map(Country::code), Some(&code("FR")));
    }

    #[test]
    fn guess_outside_active_phase_is_rejected() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        let result = session.on_guess_country(&code("FR"));

        assert_eq!(
            result,
            Err(SessionError::InvalidPhaseTransition {
                operation: Operation::GuessCountry,
                phase: "PreGame".to_string(),
            })
        );
        assert_eq!(session.number_countries_guessed(), 0);
    }

    #[test]
    fn completion_requires_every_country() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(None).unwrap();

        for raw in ["FR", "DE"] {
            session.on_guess_country(&code(raw)).unwrap();
        }
        assert!(!session.has_guessed_countries());

        session.on_guess_country(&code("IT")).unwrap();
        assert!(session.has_guessed_countries());
    }

    #[test]
    fn game_end_opens_results() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(5)).unwrap();

        session.on_game_end().unwrap();

        let flags = session.flags();
        assert!(flags.is_results_dialog_open);
        assert!(!flags.is_showing_controls);
        assert!(!flags.is_counter_finishing);
        assert_eq!(flags.ends_at, None);
    }

    #[test]
    fn game_end_requires_running_round() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        assert!(matches!(
            session.on_game_end(),
            Err(SessionError::InvalidPhaseTransition {
                operation: Operation::EndGame,
                ..
            })
        ));
    }

    #[test]
    fn finishing_then_ending() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(5)).unwrap();

        session.begin_finishing().unwrap();
        let flags = session.flags();
        assert!(flags.is_counter_finishing);
        assert!(flags.is_showing_controls);
        assert_eq!(flags.ends_at, None);
        assert!(session.on_guess_country(&code("FR")).is_err());

        clock.advance(Duration::seconds(1));
        session.on_game_end().unwrap();
        assert_eq!(session.phase(), &SessionPhase::Ended);
        assert_eq!(
            session.round_duration(),
            Some(std::time::Duration::from_secs(0))
        );
    }

    #[test]
    fn round_duration_measures_active_time() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        session.start_game(None).unwrap();
        clock.advance(Duration::seconds(42));
        session.on_game_end().unwrap();

        assert_eq!(
            session.round_duration(),
            Some(std::time::Duration::from_secs(42))
        );
    }

    #[test]
    fn restart_confirmation_round_trip() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(5)).unwrap();
        session.on_game_end().unwrap();

        session.open_restart_confirmation().unwrap();
        assert!(session.flags().is_game_restart_confirmation_open);
        assert!(!session.flags().is_results_dialog_open);

        session.cancel_restart_confirmation().unwrap();
        assert_eq!(session.phase(), &SessionPhase::Ended);
        assert!(session.cancel_restart_confirmation().is_err());
    }

    #[test]
    fn confirmation_is_rejected_mid_round() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(60)).unwrap();
        let ends_at = session.ends_at();

        let result = session.open_restart_confirmation();

        assert!(matches!(
            result,
            Err(SessionError::InvalidPhaseTransition {
                operation: Operation::OpenRestartConfirmation,
                ..
            })
        ));
        assert_eq!(session.ends_at(), ends_at);
        assert!(session.flags().is_showing_controls);

        session.begin_finishing().unwrap();
        assert!(session.open_restart_confirmation().is_err());
    }

    #[test]
    fn repeated_starts_keep_only_current_round_history() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        for _ in 0..100 {
            session.start_game(Some(5)).unwrap();
        }
        assert_eq!(session.history().transitions().len(), 1);

        clock.advance(Duration::seconds(3));
        session.on_game_end().unwrap();
        assert_eq!(session.history().transitions().len(), 2);
        assert_eq!(
            session.round_duration(),
            Some(std::time::Duration::from_secs(3))
        );
    }

    #[test]
    fn restart_resets_everything() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(5)).unwrap();
        session.on_guess_country(&code("FR")).unwrap();
        session.on_game_end().unwrap();
        session.open_restart_confirmation().unwrap();

        session.on_restart_game().unwrap();

        assert_eq!(session.number_countries_guessed(), 0);
        assert!(session.latest_guess().is_none());
        assert_eq!(
            session.flags(),
            PhaseFlags::from(&SessionPhase::PreGame {
                start_modal_open: true
            })
        );
        assert_eq!(session.history().transitions().len(), 1);
    }

    #[test]
    fn restart_mid_round_is_allowed() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(5)).unwrap();

        session.on_restart_game().unwrap();

        assert_eq!(session.ends_at(), None);
        assert!(session.flags().is_start_game_modal_open);
    }

    #[test]
    fn start_modal_toggles_in_pregame_only() {
        let clock = ManualClock::default();
        let mut session = session(&clock);

        session.open_start_modal().unwrap();
        assert!(session.flags().is_start_game_modal_open);
        session.close_start_modal().unwrap();
        assert!(!session.flags().is_start_game_modal_open);

        session.start_game(None).unwrap();
        assert!(session.open_start_modal().is_err());
    }

    #[test]
    fn tick_ends_game_once_deadline_passes() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(5)).unwrap();

        clock.advance(Duration::seconds(4));
        assert!(!session.tick(clock.now()));
        assert_eq!(
            session.remaining_time(clock.now()),
            Some(std::time::Duration::from_secs(1))
        );

        clock.advance(Duration::seconds(1));
        assert!(session.tick(clock.now()));
        assert!(session.flags().is_results_dialog_open);
        assert!(!session.tick(clock.now()));
    }

    #[test]
    fn tick_ignores_untimed_rounds() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(None).unwrap();

        clock.advance(Duration::days(1));

        assert!(!session.tick(clock.now()));
        assert!(session.remaining_time(clock.now()).is_none());
    }

    #[test]
    fn remaining_time_saturates_at_zero() {
        let clock = ManualClock::default();
        let mut session = session(&clock);
        session.start_game(Some(1)).unwrap();

        clock.advance(Duration::seconds(10));

        assert_eq!(
            session.remaining_time(clock.now()),
            Some(std::time::Duration::ZERO)
        );
    }
}
