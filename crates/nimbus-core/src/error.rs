//! Error types shared across the Nimbus crates.
//!
//! Each enum carries a `user_message()` accessor returning a short,
//! non-technical string suitable for on-screen display. Full context stays
//! in the error itself for logging.

use thiserror::Error;

/// Key-value storage failures.
///
/// These never reach the UI: the preference store logs them and carries on
/// with in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is malformed: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Io(_) => "Unable to access saved preferences.",
            StorageError::Encoding(_) => "Saved preferences are malformed.",
        }
    }
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no weather API key configured")]
    MissingApiKey,
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "Configuration could not be read or saved.",
            ConfigError::Parse(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Serialize(_) => "Configuration could not be saved.",
            ConfigError::MissingApiKey => {
                "No weather API key configured. Set OPENWEATHER_API_KEY or edit config.toml."
            }
        }
    }
}
