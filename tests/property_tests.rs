//! Property-based tests for the ledger and the session lifecycle.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated catalogs and guess sequences.

use country_quiz::catalog::{Country, CountryCatalog, CountryCode, Locale};
use country_quiz::collab::{ManualClock, SearchIndexBuilder};
use country_quiz::core::{PhaseFlags, SessionPhase};
use country_quiz::ledger::{GuessLedger, LedgerError};
use country_quiz::session::{SessionController, SessionError};
use country_quiz::SessionBuilder;
use proptest::prelude::*;
use std::collections::BTreeSet;

struct NoIndex;

impl SearchIndexBuilder for NoIndex {
    type Index = ();

    fn build(&self, _catalog: &CountryCatalog, _locale: &Locale) {}
}

prop_compose! {
    fn arbitrary_catalog()(codes in prop::collection::btree_set("[A-Z]{2}", 1..40)) -> CountryCatalog {
        codes.into_iter().map(Country::new).collect()
    }
}

prop_compose! {
    /// A catalog plus guesses drawn from it (with repeats).
    fn catalog_and_guesses()(catalog in arbitrary_catalog())(
        picks in prop::collection::vec(0..catalog.len(), 0..80),
        catalog in Just(catalog),
    ) -> (CountryCatalog, Vec<CountryCode>) {
        let guesses = picks
            .into_iter()
            .map(|i| catalog.as_slice()[i].code().clone())
            .collect();
        (catalog, guesses)
    }
}

fn active_session(catalog: CountryCatalog) -> SessionController<NoIndex> {
    let mut session = SessionBuilder::new()
        .catalog(catalog)
        .index_builder(NoIndex)
        .clock(ManualClock::default())
        .build()
        .unwrap();
    session.start_game(None).unwrap();
    session
}

proptest! {
    #[test]
    fn initialize_covers_catalog_unguessed(catalog in arbitrary_catalog()) {
        let ledger = GuessLedger::initialize(&catalog).unwrap();

        prop_assert_eq!(ledger.len(), catalog.len());
        prop_assert!(ledger.entries().all(|entry| !entry.guessed));
        for country in &catalog {
            prop_assert!(ledger.get(country.code()).is_some());
        }
    }

    #[test]
    fn duplicate_codes_are_rejected(catalog in arbitrary_catalog(), pick in any::<prop::sample::Index>()) {
        let mut countries = catalog.as_slice().to_vec();
        let repeated = pick.get(&countries).clone();
        countries.push(repeated.clone());

        let result = GuessLedger::initialize(&CountryCatalog::new(countries));

        prop_assert_eq!(
            result,
            Err(LedgerError::InvalidCatalog { duplicates: vec![repeated.code().clone()] })
        );
    }

    #[test]
    fn guessing_is_monotonic_and_bounded((catalog, guesses) in catalog_and_guesses()) {
        let size = catalog.len();
        let mut session = active_session(catalog);
        let mut previous = 0;

        for code in &guesses {
            session.on_guess_country(code).unwrap();
            let count = session.number_countries_guessed();
            prop_assert!(count >= previous);
            prop_assert!(count <= size);
            previous = count;
        }
    }

    #[test]
    fn count_matches_distinct_guesses((catalog, guesses) in catalog_and_guesses()) {
        let mut session = active_session(catalog);

        for code in &guesses {
            session.on_guess_country(code).unwrap();
        }

        let distinct: BTreeSet<&CountryCode> = guesses.iter().collect();
        prop_assert_eq!(session.number_countries_guessed(), distinct.len());
        if let Some(last) = guesses.last() {
            prop_assert_eq!(session.latest_guess().map(Country::code), Some(last));
        }
    }

    #[test]
    fn completion_iff_every_entry_guessed((catalog, guesses) in catalog_and_guesses()) {
        let mut session = active_session(catalog);

        for code in &guesses {
            session.on_guess_country(code).unwrap();
        }

        let all_guessed = session.ledger().entries().all(|entry| entry.guessed);
        prop_assert_eq!(session.has_guessed_countries(), all_guessed);
    }

    #[test]
    fn restart_resets_fully((catalog, guesses) in catalog_and_guesses(), end_first in any::<bool>()) {
        let mut session = active_session(catalog);
        for code in &guesses {
            session.on_guess_country(code).unwrap();
        }
        if end_first {
            session.on_game_end().unwrap();
        }

        session.on_restart_game().unwrap();

        prop_assert_eq!(session.number_countries_guessed(), 0);
        prop_assert!(session.latest_guess().is_none());
        prop_assert_eq!(
            session.flags(),
            PhaseFlags::from(&SessionPhase::PreGame { start_modal_open: true })
        );
    }

    #[test]
    fn unknown_code_fails_without_mutation(
        (catalog, guesses) in catalog_and_guesses(),
        unknown in "[a-z]{3}",
    ) {
        let mut session = active_session(catalog);
        for code in &guesses {
            session.on_guess_country(code).unwrap();
        }
        let before = session.ledger().clone();
        let unknown = CountryCode::new(unknown);

        let result = session.on_guess_country(&unknown);

        prop_assert_eq!(
            result,
            Err(SessionError::Ledger(LedgerError::UnknownCountryCode(unknown)))
        );
        prop_assert_eq!(session.ledger(), &before);
    }
}
