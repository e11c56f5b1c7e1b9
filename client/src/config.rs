//! Configuration management for the air quality dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides, e.g. `AQD_API__BASE_URL`

use std::time::Duration;

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{validate_aqi_threshold, validate_history_days, Location, DEFAULT_ALERT_THRESHOLD};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Default dashboard view
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Name shown for the default location
    pub location_name: String,

    pub latitude: Decimal,

    pub longitude: Decimal,

    /// Days of history to chart
    pub history_days: u32,

    /// Alert banner threshold (AQI)
    pub alert_threshold: i32,
}

impl DashboardConfig {
    pub fn location(&self) -> Location {
        Location::new(self.location_name.clone(), self.latitude, self.longitude)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            location_name: "New Delhi".to_string(),
            latitude: Decimal::new(286139, 4),
            longitude: Decimal::new(772090, 4),
            history_days: 7,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AQD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("api.timeout_secs", 10)?
            .set_default("dashboard.location_name", "New Delhi")?
            .set_default("dashboard.latitude", "28.6139")?
            .set_default("dashboard.longitude", "77.2090")?
            .set_default("dashboard.history_days", 7)?
            .set_default("dashboard.alert_threshold", DEFAULT_ALERT_THRESHOLD as i64)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AQD_ prefix)
            .add_source(
                Environment::with_prefix("AQD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Config = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values the dashboard cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Message("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Message("api.timeout_secs must be positive".into()));
        }
        validate_history_days(self.dashboard.history_days)
            .map_err(|e| ConfigError::Message(format!("dashboard.history_days: {}", e)))?;
        validate_aqi_threshold(self.dashboard.alert_threshold)
            .map_err(|e| ConfigError::Message(format!("dashboard.alert_threshold: {}", e)))?;
        shared::validate_coordinates(&self.dashboard.location().coordinates())
            .map_err(|e| ConfigError::Message(format!("dashboard location: {}", e)))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api: ApiConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}
