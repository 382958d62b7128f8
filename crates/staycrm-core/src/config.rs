//! Configuration management for the StayCRM analytics toolkit

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    #[validate(nested)]
    pub backend: BackendConfig,

    /// Auth token storage
    #[serde(default)]
    pub auth: AuthConfig,

    /// Tunables for the metrics reducer
    #[serde(default)]
    #[validate(nested)]
    pub metrics: MetricsConfig,

    /// Dashboard refresh behaviour
    #[serde(default)]
    #[validate(nested)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackendConfig {
    /// Base URL of the CRM REST backend
    #[serde(default = "default_base_url")]
    #[validate(url)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,

    /// Page size used when the caller does not supply one
    #[serde(default = "default_page_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub default_page_limit: u32,

    /// Answer failed live calls from the built-in mock dataset
    #[serde(default = "default_mock_fallback")]
    pub mock_fallback: bool,
}

/// Auth token storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Where the bearer token is persisted; platform data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_path: Option<PathBuf>,
}

/// Tunables for the metrics reducer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MetricsConfig {
    /// Room inventory assumed by the occupancy approximation
    #[serde(default = "default_assumed_room_count")]
    #[validate(range(min = 1))]
    pub assumed_room_count: u32,

    /// Days in the occupancy window
    #[serde(default = "default_occupancy_days")]
    #[validate(range(min = 1, max = 366))]
    pub occupancy_days: u32,

    /// Number of calendar months in the monthly series
    #[serde(default = "default_months")]
    #[validate(range(min = 1, max = 24))]
    pub months: u32,

    /// Cities matched against booking property names
    #[serde(default = "default_known_cities")]
    pub known_cities: Vec<String>,
}

/// Dashboard refresh behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    /// Interval for `--watch` mode when none is given on the command line
    #[serde(default = "default_refresh_interval_secs")]
    #[validate(range(min = 5))]
    pub refresh_interval_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log to file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    15
}

const fn default_page_limit() -> u32 {
    100
}

const fn default_mock_fallback() -> bool {
    true
}

const fn default_assumed_room_count() -> u32 {
    100
}

const fn default_occupancy_days() -> u32 {
    30
}

const fn default_months() -> u32 {
    6
}

fn default_known_cities() -> Vec<String> {
    [
        "Mumbai",
        "Delhi",
        "Bangalore",
        "Goa",
        "Jaipur",
        "Udaipur",
        "Chennai",
        "Hyderabad",
        "Kolkata",
        "Pune",
    ]
    .iter()
    .map(|city| (*city).to_string())
    .collect()
}

const fn default_refresh_interval_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            default_page_limit: default_page_limit(),
            mock_fallback: default_mock_fallback(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            assumed_room_count: default_assumed_room_count(),
            occupancy_days: default_occupancy_days(),
            months: default_months(),
            known_cities: default_known_cities(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from `staycrm.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default config file
    ///
    /// Environment variables use the `STAYCRM_` prefix and `__` between
    /// nested keys, e.g. `STAYCRM_BACKEND__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("staycrm").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("STAYCRM")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("metrics.known_cities")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.check()?;
        tracing::debug!(
            file = ?path,
            base_url = %config.backend.base_url,
            mock_fallback = config.backend.mock_fallback,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate field ranges
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn check(&self) -> crate::Result<()> {
        self.validate().map_err(|errors| crate::Error::Validation {
            field: errors
                .errors()
                .keys()
                .next()
                .map_or_else(|| "config".to_string(), ToString::to_string),
            message: errors.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::field_reassign_with_default)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.backend.base_url, "http://localhost:5000/api");
        assert_eq!(config.backend.request_timeout_secs, 15);
        assert_eq!(config.backend.default_page_limit, 100);
        assert!(config.backend.mock_fallback);

        assert!(config.auth.token_path.is_none());

        assert_eq!(config.metrics.assumed_room_count, 100);
        assert_eq!(config.metrics.occupancy_days, 30);
        assert_eq!(config.metrics.months, 6);
        assert!(config.metrics.known_cities.contains(&"Goa".to_string()));

        assert_eq!(config.dashboard.refresh_interval_secs, 30);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().check().is_ok());
    }

    #[test]
    fn test_invalid_months_rejected() {
        let mut config = Config::default();
        config.metrics.months = 0;

        let err = config.check().unwrap_err();
        assert!(matches!(err, crate::Error::Validation { .. }));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default();
        config.backend.base_url = "not a url".to_string();

        assert!(config.check().is_err());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "backend": {"base_url": "https://crm.example.com/api"},
            "metrics": {"assumed_room_count": 40}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.backend.base_url, "https://crm.example.com/api");
        assert_eq!(config.backend.request_timeout_secs, 15);
        assert_eq!(config.metrics.assumed_room_count, 40);
        assert_eq!(config.metrics.occupancy_days, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[backend]
base_url = "https://crm.example.com/api"
mock_fallback = false

[metrics]
known_cities = ["Shimla", "Manali"]

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();

        assert_eq!(config.backend.base_url, "https://crm.example.com/api");
        assert!(!config.backend.mock_fallback);
        assert_eq!(config.metrics.known_cities, vec!["Shimla", "Manali"]);
        assert_eq!(config.metrics.months, 6);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Config::load_from(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }

    #[test]
    fn test_config_serialization_skips_empty_token_path() {
        let serialized = serde_json::to_string(&Config::default()).unwrap();
        assert!(!serialized.contains("token_path"));

        let deserialized: Config = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.metrics.months, 6);
    }
}
