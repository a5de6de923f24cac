//! Settings error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading game settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}
