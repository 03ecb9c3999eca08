use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::types::{
    ConditionsResponse, CurrentConditions, RejectionBody, WeatherError, GENERIC_REJECTION,
};

/// Client for the current-conditions endpoint. One GET per lookup, no
/// retries, no caching — orchestration policy lives a layer up.
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

// Manual Debug so the credential can never end up in a log line.
impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(WeatherError::RequestSetup)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Look up current conditions for a city. Exactly one network round
    /// trip; every failure mode is normalized into [`WeatherError`].
    pub async fn fetch(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        debug!(city, "fetching current conditions");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("APPID", self.api_key.as_str())])
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the server-supplied message, fall back to the generic one.
            let message = response
                .json::<RejectionBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_REJECTION.to_string());
            debug!(%status, "lookup rejected: {message}");
            return Err(WeatherError::Rejected { message });
        }

        let body: ConditionsResponse =
            response.json().await.map_err(|err| {
                debug!("unparseable success body: {err}");
                WeatherError::Rejected {
                    message: GENERIC_REJECTION.to_string(),
                }
            })?;

        Ok(body.into())
    }
}

/// Triage an error from `send()`: connectivity problems mean no response
/// ever arrived; everything else is a local setup fault.
fn classify_send_error(err: reqwest::Error) -> WeatherError {
    if err.is_connect() || err.is_timeout() {
        WeatherError::NetworkUnavailable
    } else {
        WeatherError::RequestSetup(err)
    }
}
