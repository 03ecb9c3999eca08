//! The user preference store: last searched city and dark-mode flag.
//!
//! State transitions are pure and synchronous; persistence is a separate
//! fire-and-forget effect the caller composes with the transition. Storage
//! failures are logged and absorbed here — consumers only ever see the
//! in-memory values.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::storage::{KeyValueStore, DARK_MODE_KEY, LAST_CITY_KEY};

/// One preference slice resolved from storage at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefLoaded {
    City(Option<String>),
    DarkMode(Option<bool>),
}

#[derive(Debug)]
struct Slice<T> {
    value: T,
    /// Set once the user has changed this slice. A user action issued
    /// before the startup load resolves must win over the loaded value.
    touched: bool,
}

impl<T> Slice<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            touched: false,
        }
    }
}

pub struct Preferences {
    storage: Arc<dyn KeyValueStore>,
    city: Slice<String>,
    dark_mode: Slice<bool>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            city: Slice::new(String::new()),
            dark_mode: Slice::new(false),
        }
    }

    pub fn last_city(&self) -> &str {
        &self.city.value
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.value
    }

    /// Pure transition: record the last searched city. Visible to readers
    /// immediately; call [`persist_last_city`](Self::persist_last_city) to
    /// write it through.
    pub fn set_last_city(&mut self, city: impl Into<String>) {
        self.city.value = city.into();
        self.city.touched = true;
    }

    /// Pure transition: flip the dark-mode flag, returning the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode.value = !self.dark_mode.value;
        self.dark_mode.touched = true;
        self.dark_mode.value
    }

    /// Fire-and-forget persist of the city slice. A failure is logged,
    /// never surfaced, never retried.
    pub fn persist_last_city(&self) {
        let storage = Arc::clone(&self.storage);
        let city = self.city.value.clone();
        tokio::spawn(async move {
            if let Err(err) = storage.put(LAST_CITY_KEY, &city).await {
                warn!("failed to persist {LAST_CITY_KEY}: {err}");
            }
        });
    }

    /// Fire-and-forget persist of the dark-mode slice, JSON-encoded.
    pub fn persist_dark_mode(&self) {
        let storage = Arc::clone(&self.storage);
        let dark_mode = self.dark_mode.value;
        tokio::spawn(async move {
            let encoded = dark_mode.to_string();
            if let Err(err) = storage.put(DARK_MODE_KEY, &encoded).await {
                warn!("failed to persist {DARK_MODE_KEY}: {err}");
            }
        });
    }

    /// Spawn the startup loads, one task per slice. Each resolves to a
    /// [`PrefLoaded`] event on `tx`; storage errors and unparseable values
    /// collapse to an absent value (fail soft).
    pub fn spawn_load(&self, tx: mpsc::UnboundedSender<PrefLoaded>) {
        let storage = Arc::clone(&self.storage);
        let city_tx = tx.clone();
        tokio::spawn(async move {
            let value = match storage.get(LAST_CITY_KEY).await {
                Ok(value) => value,
                Err(err) => {
                    warn!("failed to load {LAST_CITY_KEY}: {err}");
                    None
                }
            };
            let _ = city_tx.send(PrefLoaded::City(value));
        });

        let storage = Arc::clone(&self.storage);
        tokio::spawn(async move {
            let value = match storage.get(DARK_MODE_KEY).await {
                Ok(Some(raw)) => match serde_json::from_str::<bool>(&raw) {
                    Ok(flag) => Some(flag),
                    Err(err) => {
                        warn!("stored {DARK_MODE_KEY} is malformed: {err}");
                        None
                    }
                },
                Ok(None) => None,
                Err(err) => {
                    warn!("failed to load {DARK_MODE_KEY}: {err}");
                    None
                }
            };
            let _ = tx.send(PrefLoaded::DarkMode(value));
        });
    }

    /// Merge a resolved startup load into the store. Absent values leave
    /// the slice unchanged, and a slice the user already touched is never
    /// overwritten by a late-arriving load.
    pub fn apply_loaded(&mut self, loaded: PrefLoaded) {
        match loaded {
            PrefLoaded::City(Some(city)) if !self.city.touched => {
                self.city.value = city;
            }
            PrefLoaded::DarkMode(Some(flag)) if !self.dark_mode.touched => {
                self.dark_mode.value = flag;
            }
            _ => {}
        }
    }
}
