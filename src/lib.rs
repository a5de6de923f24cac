//! Country Quiz: session state for a guess-every-country game
//!
//! The crate tracks which countries a player has named, the countdown of the
//! current round, and the modal phase the UI should show. Country data, the
//! locale-aware name lookup and the clock are collaborators supplied by the
//! application through the traits in [`collab`].
//!
//! # Core Concepts
//!
//! - **Ledger**: one guessed/unguessed entry per catalog country
//! - **Phase**: the mutually exclusive lifecycle state of a round
//! - **Session**: the controller that drives phases and owns the ledger
//!
//! # Example
//!
//! ```rust
//! use country_quiz::builder::SessionBuilder;
//! use country_quiz::catalog::{Country, CountryCatalog, CountryCode, Locale};
//! use country_quiz::collab::{ManualClock, SearchIndexBuilder};
//!
//! struct NoIndex;
//!
//! impl SearchIndexBuilder for NoIndex {
//!     type Index = ();
//!     fn build(&self, _: &CountryCatalog, _: &Locale) {}
//! }
//!
//! let mut session = SessionBuilder::new()
//!     .catalog(vec![Country::new("FR"), Country::new("DE"), Country::new("IT")])
//!     .index_builder(NoIndex)
//!     .clock(ManualClock::default())
//!     .build()
//!     .unwrap();
//!
//! session.start_game(Some(5)).unwrap();
//! session.on_guess_country(&CountryCode::from("FR")).unwrap();
//! assert_eq!(session.number_countries_guessed(), 1);
//!
//! session.on_game_end().unwrap();
//! assert!(session.flags().is_results_dialog_open);
//!
//! session.on_restart_game().unwrap();
//! assert_eq!(session.number_countries_guessed(), 0);
//! assert!(session.flags().is_start_game_modal_open);
//! ```

pub mod builder;
pub mod catalog;
pub mod collab;
pub mod core;
pub mod countdown;
pub mod ledger;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use builder::{BuildError, SessionBuilder};
pub use catalog::{Country, CountryCatalog, CountryCode, Locale};
pub use crate::core::{PhaseFlags, SessionPhase};
pub use ledger::{GuessEntry, GuessLedger, LedgerError};
pub use session::{SessionController, SessionError, SharedSession};
pub use settings::GameSettings;
