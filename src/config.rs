//! Configuration management for the surfcast service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SurfcastError;
use crate::models::SurfSpot;
use crate::surf::conditions::SurfThresholds;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the surfcast service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfcastConfig {
    /// Marine forecast provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Persistent store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Surfability classification thresholds
    #[serde(default)]
    pub thresholds: SurfThresholds,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Surf spot catalog, synced into the store at startup
    #[serde(default)]
    pub spots: Vec<SurfSpot>,
}

/// Marine forecast provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider API key, sent as the Authorization header
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the point-forecast endpoint
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_provider_max_retries")]
    pub max_retries: u32,
    /// Forecast window length per ingestion pass, in hours
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
}

/// Persistent store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store directory; empty means the platform data directory
    #[serde(default)]
    pub location: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_provider_base_url() -> String {
    "https://api.stormglass.io/v2/weather/point".to_string()
}

fn default_provider_timeout() -> u32 {
    10
}

fn default_provider_max_retries() -> u32 {
    3
}

fn default_window_hours() -> i64 {
    24
}

fn default_server_port() -> u16 {
    2137
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_provider_base_url(),
            timeout_seconds: default_provider_timeout(),
            max_retries: default_provider_max_retries(),
            window_hours: default_window_hours(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: String::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SurfcastConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            store: StoreConfig::default(),
            server: ServerConfig::default(),
            thresholds: SurfThresholds::default(),
            logging: LoggingConfig::default(),
            spots: Vec::new(),
        }
    }
}

impl StoreConfig {
    /// Resolve the store directory, falling back to the platform data dir
    #[must_use]
    pub fn resolved_location(&self) -> PathBuf {
        if self.location.is_empty() {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("surfcast")
        } else {
            PathBuf::from(&self.location)
        }
    }
}

impl SurfcastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder().add_source(
            File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        );

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with SURFCAST_ prefix
        // SURFCAST_PROVIDER__API_KEY -> provider.api_key; the double
        // underscore separates nesting levels, not words.
        builder = builder.add_source(
            Environment::with_prefix("SURFCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SurfcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("surfcast").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.provider.base_url.is_empty() {
            self.provider.base_url = default_provider_base_url();
        }
        if self.provider.timeout_seconds == 0 {
            self.provider.timeout_seconds = default_provider_timeout();
        }
        if self.provider.window_hours == 0 {
            self.provider.window_hours = default_window_hours();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_catalog()?;
        Ok(())
    }

    /// Validate the provider API key
    pub fn validate_api_key(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            return Err(SurfcastError::config(
                "Provider API key is required. Set provider.api_key or SURFCAST_PROVIDER__API_KEY.",
            )
            .into());
        }

        if self.provider.api_key.len() < 8 {
            return Err(SurfcastError::config(
                "Provider API key appears to be invalid (too short). Please check your API key.",
            )
            .into());
        }

        if self.provider.api_key.len() > 200 {
            return Err(SurfcastError::config(
                "Provider API key appears to be invalid (too long). Please check your API key.",
            )
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.provider.timeout_seconds > 300 {
            return Err(
                SurfcastError::config("Provider timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.provider.max_retries > 10 {
            return Err(SurfcastError::config("Provider max retries cannot exceed 10").into());
        }

        if !(1..=240).contains(&self.provider.window_hours) {
            return Err(SurfcastError::config(
                "Forecast window must be between 1 and 240 hours",
            )
            .into());
        }

        if !self.thresholds.min_swell_m.is_finite() || self.thresholds.min_swell_m < 0.0 {
            return Err(SurfcastError::config(
                "Minimum swell height must be a non-negative number",
            )
            .into());
        }

        if !self.thresholds.max_wind_kmh.is_finite() || self.thresholds.max_wind_kmh <= 0.0 {
            return Err(
                SurfcastError::config("Maximum wind speed must be a positive number").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SurfcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SurfcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(SurfcastError::config(
                "Provider base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Validate the configured spot catalog
    ///
    /// Coordinate strings are deliberately not parsed here; a malformed
    /// coordinate fails the operation that needs it, not startup.
    fn validate_catalog(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for spot in &self.spots {
            if spot.name.trim().is_empty() {
                return Err(SurfcastError::config(format!(
                    "Spot {} has an empty name",
                    spot.id
                ))
                .into());
            }
            if !seen.insert(spot.id) {
                return Err(SurfcastError::config(format!(
                    "Duplicate spot id {} in catalog",
                    spot.id
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> SurfcastConfig {
        let mut config = SurfcastConfig::default();
        config.provider.api_key = "valid_api_key_123".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = SurfcastConfig::default();
        assert_eq!(
            config.provider.base_url,
            "https://api.stormglass.io/v2/weather/point"
        );
        assert_eq!(config.provider.timeout_seconds, 10);
        assert_eq!(config.provider.window_hours, 24);
        assert_eq!(config.server.port, 2137);
        assert_eq!(config.thresholds.min_swell_m, 0.4);
        assert_eq!(config.thresholds.max_wind_kmh, 40.0);
        assert_eq!(config.logging.level, "info");
        assert!(config.spots.is_empty());
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = SurfcastConfig::default();
        let result = config.validate_api_key();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key"));
    }

    #[test]
    fn test_valid_api_key_passes() {
        let config = config_with_key();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let mut config = config_with_key();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_numeric_ranges_are_enforced() {
        let mut config = config_with_key();
        config.provider.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = config_with_key();
        config.thresholds.max_wind_kmh = 0.0;
        assert!(config.validate().is_err());

        let mut config = config_with_key();
        config.thresholds.min_swell_m = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_spot_ids_are_rejected() {
        let mut config = config_with_key();
        config.spots = vec![
            SurfSpot::new(1, "First".to_string(), "34.0".to_string(), "-118.0".to_string()),
            SurfSpot::new(1, "Also First".to_string(), "35.0".to_string(), "-119.0".to_string()),
        ];
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate spot id"));
    }

    #[test]
    fn test_catalog_coordinates_are_not_parsed_at_startup() {
        let mut config = config_with_key();
        config.spots = vec![SurfSpot::new(
            1,
            "Somewhere".to_string(),
            "not-a-number".to_string(),
            "-118.0".to_string(),
        )];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_store_location_resolution() {
        let store = StoreConfig {
            location: "/tmp/surfcast-test".to_string(),
        };
        assert_eq!(store.resolved_location(), PathBuf::from("/tmp/surfcast-test"));

        let store = StoreConfig::default();
        let resolved = store.resolved_location();
        assert!(resolved.to_string_lossy().contains("surfcast"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = SurfcastConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("surfcast"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
