//! Contracts for the collaborators the session consumes but does not own.
//!
//! - [`Clock`]: source of "now" for deadline arithmetic
//! - [`LocaleProvider`]: the display language selected at call time
//! - [`SearchIndexBuilder`]: builds the locale-aware name lookup structure
//!
//! The session only triggers index rebuilds and stores the returned handle;
//! the index internals live with the builder implementation.

mod clock;
mod locale;
mod search;

pub use clock::{Clock, ManualClock, SystemClock};
pub use locale::{FixedLocale, LocaleProvider, SharedLocale};
pub use search::SearchIndexBuilder;
