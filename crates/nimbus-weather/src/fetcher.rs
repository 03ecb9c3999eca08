//! Request orchestration: a request-state machine keyed by city name.
//!
//! The fetcher owns the current key and a generation counter. Every issued
//! request captures the generation it was started under; a result arriving
//! for an older generation is dropped at the consumption boundary, so a
//! stale in-flight request can never overwrite state for the current key.
//! The underlying transport is never aborted.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::client::WeatherClient;
use crate::types::{CurrentConditions, WeatherError};

/// The single live request state for a mounted screen.
#[derive(Debug)]
pub enum FetchState {
    /// No city selected yet (empty key).
    Disabled,
    /// A request for the current key is in flight.
    Loading,
    /// Terminal until the key changes or `refetch` is called.
    Success(CurrentConditions),
    /// Terminal until the key changes or `refetch` is called.
    Error(WeatherError),
}

/// Outcome of one spawned request, tagged with the generation it was
/// started under.
#[derive(Debug)]
pub struct FetchEvent {
    generation: u64,
    result: Result<CurrentConditions, WeatherError>,
}

pub struct WeatherFetcher {
    client: Arc<WeatherClient>,
    events: mpsc::UnboundedSender<FetchEvent>,
    city: String,
    generation: u64,
    state: FetchState,
}

impl WeatherFetcher {
    pub fn new(client: Arc<WeatherClient>, events: mpsc::UnboundedSender<FetchEvent>) -> Self {
        Self {
            client,
            events,
            city: String::new(),
            generation: 0,
            state: FetchState::Disabled,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn data(&self) -> Option<&CurrentConditions> {
        match &self.state {
            FetchState::Success(conditions) => Some(conditions),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&WeatherError> {
        match &self.state {
            FetchState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Change the key. A new non-empty key issues a request; an empty key
    /// disables the fetcher. Either way the generation moves on, so any
    /// in-flight result for the old key will be dropped.
    pub fn set_city(&mut self, city: &str) {
        if city == self.city {
            return;
        }
        self.city = city.to_string();
        if self.city.is_empty() {
            self.generation += 1;
            self.state = FetchState::Disabled;
        } else {
            self.start();
        }
    }

    /// Re-issue the request for the current key. No-op while disabled.
    pub fn refetch(&mut self) {
        if !self.city.is_empty() {
            self.start();
        }
    }

    fn start(&mut self) {
        self.generation += 1;
        self.state = FetchState::Loading;

        let generation = self.generation;
        let client = Arc::clone(&self.client);
        let city = self.city.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = fetch_with_retry(&client, &city).await;
            // The receiver may be gone during shutdown.
            let _ = events.send(FetchEvent { generation, result });
        });
    }

    /// Consume a resolved request. Results from superseded generations are
    /// ignored; a current-generation result settles `Loading`.
    pub fn apply(&mut self, event: FetchEvent) {
        if event.generation != self.generation {
            debug!(
                stale = event.generation,
                current = self.generation,
                "dropping stale fetch result"
            );
            return;
        }
        self.state = match event.result {
            Ok(conditions) => FetchState::Success(conditions),
            Err(err) => FetchState::Error(err),
        };
    }
}

/// One automatic retry on any failure; the retry's outcome is what
/// surfaces. Retry policy lives here, not in the client.
async fn fetch_with_retry(
    client: &WeatherClient,
    city: &str,
) -> Result<CurrentConditions, WeatherError> {
    match client.fetch(city).await {
        Ok(conditions) => Ok(conditions),
        Err(first) => {
            debug!(city, "retrying after failure: {first}");
            client.fetch(city).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> (WeatherFetcher, mpsc::UnboundedReceiver<FetchEvent>) {
        let client = WeatherClient::new("http://127.0.0.1:9", "test-key").unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (WeatherFetcher::new(Arc::new(client), tx), rx)
    }

    fn conditions(city: &str) -> CurrentConditions {
        CurrentConditions {
            city: city.to_string(),
            temperature_kelvin: 280.15,
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
        }
    }

    #[test]
    fn starts_disabled() {
        let (fetcher, _rx) = fetcher();
        assert!(matches!(fetcher.state(), FetchState::Disabled));
        assert!(!fetcher.is_loading());
        assert!(fetcher.data().is_none());
        assert!(fetcher.error().is_none());
    }

    #[tokio::test]
    async fn empty_key_stays_disabled() {
        let (mut fetcher, _rx) = fetcher();
        fetcher.set_city("");
        assert!(matches!(fetcher.state(), FetchState::Disabled));
    }

    #[tokio::test]
    async fn non_empty_key_enters_loading() {
        let (mut fetcher, _rx) = fetcher();
        fetcher.set_city("London");
        assert!(fetcher.is_loading());
        assert!(fetcher.data().is_none());
        assert!(fetcher.error().is_none());
    }

    #[tokio::test]
    async fn same_key_does_not_reissue() {
        let (mut fetcher, _rx) = fetcher();
        fetcher.set_city("London");
        let generation = fetcher.generation;
        fetcher.set_city("London");
        assert_eq!(fetcher.generation, generation);
    }

    #[tokio::test]
    async fn current_generation_result_settles_loading() {
        let (mut fetcher, _rx) = fetcher();
        fetcher.set_city("London");
        fetcher.apply(FetchEvent {
            generation: fetcher.generation,
            result: Ok(conditions("London")),
        });
        assert_eq!(fetcher.data().map(|c| c.city.as_str()), Some("London"));
        assert!(!fetcher.is_loading());
    }

    #[tokio::test]
    async fn stale_result_is_dropped() {
        let (mut fetcher, _rx) = fetcher();
        fetcher.set_city("London");
        let old_generation = fetcher.generation;
        fetcher.set_city("Paris");

        // The London request resolves after the key moved on.
        fetcher.apply(FetchEvent {
            generation: old_generation,
            result: Ok(conditions("London")),
        });
        assert!(fetcher.is_loading(), "stale result must not settle Paris");

        fetcher.apply(FetchEvent {
            generation: fetcher.generation,
            result: Ok(conditions("Paris")),
        });
        assert_eq!(fetcher.data().map(|c| c.city.as_str()), Some("Paris"));
    }

    #[tokio::test]
    async fn clearing_the_key_invalidates_in_flight_results() {
        let (mut fetcher, _rx) = fetcher();
        fetcher.set_city("London");
        let old_generation = fetcher.generation;
        fetcher.set_city("");

        fetcher.apply(FetchEvent {
            generation: old_generation,
            result: Ok(conditions("London")),
        });
        assert!(matches!(fetcher.state(), FetchState::Disabled));
    }

    #[tokio::test]
    async fn error_result_is_exposed() {
        let (mut fetcher, _rx) = fetcher();
        fetcher.set_city("Atlantis");
        fetcher.apply(FetchEvent {
            generation: fetcher.generation,
            result: Err(WeatherError::Rejected {
                message: "city not found".to_string(),
            }),
        });
        assert!(fetcher.error().is_some());
        assert!(fetcher.data().is_none());
        assert!(!fetcher.is_loading());
    }

    #[tokio::test]
    async fn refetch_supersedes_a_terminal_state() {
        let (mut fetcher, _rx) = fetcher();
        fetcher.set_city("London");
        fetcher.apply(FetchEvent {
            generation: fetcher.generation,
            result: Err(WeatherError::NetworkUnavailable),
        });
        assert!(fetcher.error().is_some());

        fetcher.refetch();
        assert!(fetcher.is_loading());
        assert!(fetcher.error().is_none());
    }
}
