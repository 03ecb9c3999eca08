use serde::Deserialize;
use thiserror::Error;

/// Fallback when the server rejects a request without a usable message.
pub(crate) const GENERIC_REJECTION: &str = "API Error";

/// Current conditions for one city, produced fresh per successful fetch.
/// Never persisted; superseded by the next result.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature_kelvin: f64,
    pub description: String,
    pub icon: String,
}

impl CurrentConditions {
    /// Temperature in whole degrees Celsius, rounded to nearest.
    pub fn temperature_celsius(&self) -> i64 {
        (self.temperature_kelvin - 273.15).round() as i64
    }

    /// URL of the condition icon. An empty icon id still produces a URL;
    /// whether to show it is the display layer's call.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

/// Weather lookup failures, one variant per transport outcome.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The server answered with a non-success status (unknown city, bad
    /// credential, ...). The message is the server's, when it sent one.
    #[error("{message}")]
    Rejected { message: String },

    /// The request went out but no response came back.
    #[error("network unreachable")]
    NetworkUnavailable,

    /// The request could not be built or sent at all.
    #[error("request setup failed: {0}")]
    RequestSetup(#[source] reqwest::Error),
}

impl WeatherError {
    /// Short message for on-screen display.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Rejected { .. } => "City not found!",
            WeatherError::NetworkUnavailable => "Network error. Check your connection.",
            WeatherError::RequestSetup(_) => "Request failed. Please try again.",
        }
    }
}

/// Response body of the current-conditions endpoint. Only the fields the
/// app renders; everything else is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ConditionsResponse {
    pub name: String,
    pub main: MainSection,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainSection {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl From<ConditionsResponse> for CurrentConditions {
    fn from(mut body: ConditionsResponse) -> Self {
        let entry = if body.weather.is_empty() {
            None
        } else {
            Some(body.weather.swap_remove(0))
        };
        let (description, icon) = entry
            .map(|e| (e.description, e.icon))
            .unwrap_or_default();

        Self {
            city: body.name,
            temperature_kelvin: body.main.temp,
            description,
            icon,
        }
    }
}

/// Error body the server sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct RejectionBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(kelvin: f64) -> CurrentConditions {
        CurrentConditions {
            city: "London".to_string(),
            temperature_kelvin: kelvin,
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
        }
    }

    #[test]
    fn celsius_rounds_to_nearest() {
        assert_eq!(conditions(280.15).temperature_celsius(), 7);
        assert_eq!(conditions(273.15).temperature_celsius(), 0);
        assert_eq!(conditions(272.5).temperature_celsius(), -1);
    }

    #[test]
    fn icon_url_embeds_the_icon_id() {
        assert_eq!(
            conditions(280.15).icon_url(),
            "https://openweathermap.org/img/wn/03d@2x.png"
        );
    }

    #[test]
    fn response_with_empty_weather_array_yields_empty_strings() {
        let body: ConditionsResponse =
            serde_json::from_str(r#"{"name":"Lima","main":{"temp":290.0},"weather":[]}"#).unwrap();
        let conditions = CurrentConditions::from(body);
        assert_eq!(conditions.city, "Lima");
        assert!(conditions.description.is_empty());
        assert!(conditions.icon.is_empty());
    }

    #[test]
    fn response_without_icon_still_parses() {
        let body: ConditionsResponse = serde_json::from_str(
            r#"{"name":"Lima","main":{"temp":290.0},"weather":[{"description":"mist"}]}"#,
        )
        .unwrap();
        let conditions = CurrentConditions::from(body);
        assert_eq!(conditions.description, "mist");
        assert!(conditions.icon.is_empty());
    }

    #[test]
    fn rejection_maps_to_the_fixed_display_message() {
        let err = WeatherError::Rejected {
            message: "city not found".to_string(),
        };
        assert_eq!(err.user_message(), "City not found!");
    }
}
