//! Weather lookup for Nimbus.
//!
//! Provides the OpenWeatherMap client, the domain types, and the fetch
//! orchestrator that turns single requests into a UI-consumable request
//! state machine (loading/success/error, keyed by city, one retry).

pub mod client;
pub mod fetcher;
pub mod types;

pub use client::WeatherClient;
pub use fetcher::{FetchEvent, FetchState, WeatherFetcher};
pub use types::{CurrentConditions, WeatherError};
