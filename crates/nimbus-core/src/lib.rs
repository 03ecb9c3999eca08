pub mod config;
pub mod error;
pub mod prefs;
pub mod storage;

pub use config::{Config, WeatherConfig};
pub use error::{ConfigError, StorageError};
pub use prefs::{PrefLoaded, Preferences};
pub use storage::{FileStore, KeyValueStore, MemoryStore, DARK_MODE_KEY, LAST_CITY_KEY};

use std::path::Path;

use anyhow::Result;

/// Initialize tracing for the application.
///
/// When `log_path` is given, log lines are appended to that file instead of
/// stderr; the TUI runs on the alternate screen, so writing to stderr would
/// paint over it.
pub fn init(log_path: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }

    tracing::info!("Nimbus core initialized");
    Ok(())
}
