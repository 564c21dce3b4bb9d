//! Configuration management for `tripview`
//!
//! Handles loading configuration from files and environment variables,
//! and validates the settings used by the loader, geocoder and map.

use crate::TripViewError;
use crate::geocoding::FallbackPolicy;
use crate::models::Coordinate;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TripViewConfig {
    /// Where the trip document comes from and where output goes
    #[serde(default)]
    pub data: DataConfig,
    /// Geocoding service settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Map rendering settings
    #[serde(default)]
    pub map: MapConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// File path or http(s) URL of the trip document
    #[serde(default = "default_data_source")]
    pub source: String,
    /// Output path for the rendered page
    #[serde(default = "default_output")]
    pub output: String,
}

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of a Nominatim compatible search endpoint
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
    /// What to do when an address cannot be resolved (skip or fixed)
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Coordinate used by the fixed fallback
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
}

/// Map rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Tile URL template
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    /// Attribution shown on the tile layer
    #[serde(default = "default_attribution")]
    pub attribution: String,
    /// Centre of the neutral view used when nothing resolves
    #[serde(default)]
    pub default_latitude: f64,
    #[serde(default)]
    pub default_longitude: f64,
    /// Zoom of the neutral view
    #[serde(default = "default_wide_zoom")]
    pub default_zoom: u8,
    /// Zoom used when centring on the first marker
    #[serde(default = "default_detail_zoom")]
    pub detail_zoom: u8,
    /// Padding ratio applied when fitting the viewport to markers
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,
    /// Overlay a numbered badge next to each marker
    #[serde(default = "default_number_badges")]
    pub number_badges: bool,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for everything that is not the page or the document
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

// Default value functions
fn default_data_source() -> String {
    "./data.json".to_string()
}

fn default_output() -> String {
    "index.html".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    format!("tripview/{}", env!("CARGO_PKG_VERSION"))
}

fn default_geocoding_timeout() -> u32 {
    30
}

fn default_fallback() -> String {
    "skip".to_string()
}

fn default_fallback_latitude() -> f64 {
    9.2037
}

fn default_fallback_longitude() -> f64 {
    123.1914
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

fn default_wide_zoom() -> u8 {
    2
}

fn default_detail_zoom() -> u8 {
    14
}

fn default_fit_padding() -> f64 {
    0.1
}

fn default_number_badges() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_data_source(),
            output: default_output(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_geocoding_timeout(),
            fallback: default_fallback(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            default_latitude: 0.0,
            default_longitude: 0.0,
            default_zoom: default_wide_zoom(),
            detail_zoom: default_detail_zoom(),
            fit_padding: default_fit_padding(),
            number_badges: default_number_badges(),
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl GeocodingConfig {
    /// Fallback policy described by the `fallback` setting.
    ///
    /// Unknown values are rejected by [`TripViewConfig::validate`], so this
    /// treats anything other than `fixed` as `skip`.
    #[must_use]
    pub fn fallback_policy(&self) -> FallbackPolicy {
        if self.fallback.eq_ignore_ascii_case("fixed") {
            FallbackPolicy::Fixed(Coordinate::new(
                self.fallback_latitude,
                self.fallback_longitude,
            ))
        } else {
            FallbackPolicy::Skip
        }
    }
}

impl TripViewConfig {
    /// Load configuration from `config_path`, or the default location when
    /// none is given, then apply `TRIPVIEW_` environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

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

        // TRIPVIEW_GEOCODING__BASE_URL -> geocoding.base_url
        builder = builder.add_source(
            Environment::with_prefix("TRIPVIEW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripViewConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripview").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.data.source.is_empty() {
            self.data.source = default_data_source();
        }
        if self.data.output.is_empty() {
            self.data.output = default_output();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.geocoding.fallback.is_empty() {
            self.geocoding.fallback = default_fallback();
        }
        if self.map.tile_url.is_empty() {
            self.map.tile_url = default_tile_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoding.timeout_seconds > 300 {
            return Err(
                TripViewError::config("Geocoding timeout cannot exceed 300 seconds").into(),
            );
        }

        if !(0.0..=1.0).contains(&self.map.fit_padding) {
            return Err(
                TripViewError::config("Map fit padding must be between 0.0 and 1.0").into(),
            );
        }

        if self.map.default_zoom > 19 || self.map.detail_zoom > 19 {
            return Err(TripViewError::config("Map zoom levels cannot exceed 19").into());
        }

        if !(-90.0..=90.0).contains(&self.map.default_latitude)
            || !(-180.0..=180.0).contains(&self.map.default_longitude)
        {
            return Err(
                TripViewError::config("Map default centre is not a valid coordinate").into(),
            );
        }

        if !(-90.0..=90.0).contains(&self.geocoding.fallback_latitude)
            || !(-180.0..=180.0).contains(&self.geocoding.fallback_longitude)
        {
            return Err(
                TripViewError::config("Geocoding fallback is not a valid coordinate").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripViewError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripViewError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_fallbacks = ["skip", "fixed"];
        if !valid_fallbacks.contains(&self.geocoding.fallback.to_ascii_lowercase().as_str()) {
            return Err(TripViewError::config(format!(
                "Invalid geocoding fallback '{}'. Must be one of: {}",
                self.geocoding.fallback,
                valid_fallbacks.join(", ")
            ))
            .into());
        }

        if !self.geocoding.base_url.starts_with("http://")
            && !self.geocoding.base_url.starts_with("https://")
        {
            return Err(TripViewError::config(
                "Geocoding base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TripViewConfig::default();
        assert_eq!(config.data.source, "./data.json");
        assert_eq!(config.geocoding.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.geocoding.timeout_seconds, 30);
        assert_eq!(config.map.fit_padding, 0.1);
        assert_eq!(config.logging.level, "info");
        assert!(config.map.number_badges);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_fallback_is_skip() {
        let config = TripViewConfig::default();
        assert_eq!(config.geocoding.fallback_policy(), FallbackPolicy::Skip);
    }

    #[test]
    fn test_fixed_fallback_policy() {
        let mut config = TripViewConfig::default();
        config.geocoding.fallback = "Fixed".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.geocoding.fallback_policy(),
            FallbackPolicy::Fixed(Coordinate::new(9.2037, 123.1914))
        );
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripViewConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripViewConfig::default();
        config.geocoding.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = TripViewConfig::default();
        config.map.fit_padding = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_unknown_fallback() {
        let mut config = TripViewConfig::default();
        config.geocoding.fallback = "guess".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = TripViewConfig::default();
        config.data.source = String::new();
        config.geocoding.timeout_seconds = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.data.source, "./data.json");
        assert_eq!(config.geocoding.timeout_seconds, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[data]\nsource = \"trips/boracay.json\"\n\n[map]\nnumber_badges = false\nfit_padding = 0.2"
        )
        .unwrap();

        let config = TripViewConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.data.source, "trips/boracay.json");
        assert!(!config.map.number_badges);
        assert_eq!(config.map.fit_padding, 0.2);
        assert_eq!(config.geocoding.fallback, "skip");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TripViewConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("tripview"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
