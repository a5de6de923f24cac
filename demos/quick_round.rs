//! Quick Round
//!
//! Plays a two-second round against the wall clock with a background
//! countdown watcher, then prints the results and restarts.
//!
//! Run with: RUST_LOG=debug cargo run --example quick_round

use country_quiz::catalog::{Country, CountryCatalog, CountryCode, Locale};
use country_quiz::collab::{SearchIndexBuilder, SharedLocale};
use country_quiz::countdown::watch;
use country_quiz::session::share;
use country_quiz::{GameSettings, SessionBuilder};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

struct NameLookup;

impl SearchIndexBuilder for NameLookup {
    type Index = BTreeMap<String, CountryCode>;

    fn build(&self, catalog: &CountryCatalog, locale: &Locale) -> Self::Index {
        catalog
            .iter()
            .map(|c| (c.display_name(locale).to_lowercase(), c.code().clone()))
            .collect()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    println!("=== Quick Round ===\n");

    let settings = GameSettings {
        default_duration_seconds: 2,
        tick_interval_ms: 50,
        ..GameSettings::default()
    }
    .with_env_overrides()?;

    let locale = SharedLocale::new(settings.startup_locale.clone());
    let session = SessionBuilder::new()
        .catalog(vec![
            Country::new("FR").with_name("en", "France"),
            Country::new("DE").with_name("en", "Germany"),
            Country::new("IT").with_name("en", "Italy"),
            Country::new("ES").with_name("en", "Spain"),
        ])
        .index_builder(NameLookup)
        .locale(locale)
        .settings(settings)
        .build()?;
    let session = share(session);

    session.lock().start_default_game()?;
    let period = session.lock().settings().tick_interval();
    let watcher = tokio::spawn(watch(session.clone(), period));

    for typed in ["france", "atlantis", "italy"] {
        let mut guard = session.lock();
        let matched = guard.search_index().get(typed).cloned();
        match matched {
            Some(code) => {
                guard.on_guess_country(&code)?;
                println!("  {typed:>10} -> {code}");
            }
            None => println!("  {typed:>10} -> no match"),
        }
    }

    let outcome = watcher.await?;
    println!("\nWatcher finished: {outcome:?}");

    let mut guard = session.lock();
    println!(
        "Guessed {} of {} countries",
        guard.number_countries_guessed(),
        guard.catalog_size()
    );
    let missed: Vec<String> = guard
        .ledger()
        .remaining()
        .map(|c| c.code().to_string())
        .collect();
    println!("Missed: {}", missed.join(", "));
    if let Some(taken) = guard.round_duration() {
        println!("Round lasted {:.1}s", taken.as_secs_f64());
    }

    guard.on_restart_game()?;
    println!("\nRestarted, flags: {:?}", guard.flags());

    println!("\n=== Example Complete ===");
    Ok(())
}
