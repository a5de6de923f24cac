//! Game configuration.
//!
//! Settings start from [`GameSettings::default`], may be read from a TOML
//! file, and can then be overridden by `QUIZ__*` environment variables.
//!
//! ```toml
//! default_duration_seconds = 300
//! startup_locale = "fr"
//! tick_interval_ms = 100
//! ```

mod error;

pub use error::SettingsError;

use crate::catalog::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const ENV_DEFAULT_DURATION: &str = "QUIZ__DEFAULT_DURATION_SECONDS";
pub const ENV_STARTUP_LOCALE: &str = "QUIZ__STARTUP_LOCALE";
pub const ENV_TICK_INTERVAL: &str = "QUIZ__TICK_INTERVAL_MS";

/// Tunables for a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Countdown used by `start_default_game`. Zero means untimed.
    pub default_duration_seconds: u64,
    /// Locale of the search index built before the first round.
    pub startup_locale: Locale,
    /// How often the countdown watcher polls the deadline.
    pub tick_interval_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            default_duration_seconds: 5,
            startup_locale: Locale::from("en"),
            tick_interval_ms: 250,
        }
    }
}

impl GameSettings {
    pub fn from_toml_str(raw: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(raw)?;
        settings.validate()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Apply `QUIZ__*` variables from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, SettingsError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DEFAULT_DURATION) {
            self.default_duration_seconds = parse_number(ENV_DEFAULT_DURATION, &raw)?;
        }
        if let Some(raw) = lookup(ENV_STARTUP_LOCALE) {
            self.startup_locale = Locale::new(raw.trim());
        }
        if let Some(raw) = lookup(ENV_TICK_INTERVAL) {
            self.tick_interval_ms = parse_number(ENV_TICK_INTERVAL, &raw)?;
        }
        self.validate()
    }

    /// Countdown for `start_default_game`; `None` when untimed.
    pub fn default_duration(&self) -> Option<u64> {
        (self.default_duration_seconds > 0).then_some(self.default_duration_seconds)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::InvalidValue {
                key: "tick_interval_ms".to_string(),
                value: "0".to_string(),
            });
        }
        if self.startup_locale.as_str().is_empty() {
            return Err(SettingsError::InvalidValue {
                key: "startup_locale".to_string(),
                value: String::new(),
            });
        }
        Ok(self)
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, SettingsError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| SettingsError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}
