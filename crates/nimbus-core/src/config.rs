use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    #[serde(skip)]
    pub config_dir: PathBuf,

    /// Weather service settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Endpoint for current-conditions lookups
    pub base_url: String,

    /// API credential. Empty by default; supplied via the config file or
    /// the `OPENWEATHER_API_KEY` environment variable. Never logged.
    pub api_key: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nimbus");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default directory, creating the file
    /// with defaults if it doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self::load_from(&defaults.config_dir)?;
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Load configuration rooted at an explicit directory.
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.toml");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut parsed: Config = toml::from_str(&contents)?;
            parsed.config_dir = config_dir.to_path_buf();
            Ok(parsed)
        } else {
            let config = Config {
                config_dir: config_dir.to_path_buf(),
                ..Config::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    /// The environment wins over the file; empty or unset values leave the
    /// file's key in place.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key {
            if !key.is_empty() {
                self.weather.api_key = key;
            }
        }
        self
    }

    /// Write the current configuration back to `config.toml`.
    pub fn save(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.config_dir)?;
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(self.config_dir.join("config.toml"), contents)?;
        Ok(())
    }

    /// Check that the configuration is usable for network requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weather.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}
