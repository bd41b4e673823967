//! Configuration types for feature sources
//!
//! `FetchOptions` is the per-call option set the collector honors. It uses
//! the camelCase names feature service clients conventionally accept
//! (`outFields`, `supportsPagination`, ...). `SourceConfig` wraps it with
//! the endpoint, HTTP client settings and output settings so a whole fetch
//! can be described in one YAML or JSON file.

use crate::error::{Error, Result};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Fetch Options
// ============================================================================

/// Options controlling a single collection call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOptions {
    /// Field selector sent as `outFields` (`*` selects every attribute)
    #[serde(default = "default_out_fields")]
    pub out_fields: String,

    /// Whether to start out requesting pages with `resultOffset`
    #[serde(default = "default_true")]
    pub supports_pagination: bool,

    /// Log a progress notice after every capped page
    #[serde(default = "default_true")]
    pub display_incomplete_feature_collections: bool,

    /// Number of decimals the server rounds coordinates to
    #[serde(default = "default_geometry_precision")]
    pub geometry_precision: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            out_fields: default_out_fields(),
            supports_pagination: true,
            display_incomplete_feature_collections: true,
            geometry_precision: default_geometry_precision(),
        }
    }
}

impl FetchOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field selector
    #[must_use]
    pub fn with_out_fields(mut self, out_fields: impl Into<String>) -> Self {
        self.out_fields = out_fields.into();
        self
    }

    /// Set whether offset paging is attempted
    #[must_use]
    pub fn with_pagination(mut self, supported: bool) -> Self {
        self.supports_pagination = supported;
        self
    }

    /// Set whether progress notices are emitted for capped pages
    #[must_use]
    pub fn with_progress(mut self, display: bool) -> Self {
        self.display_incomplete_feature_collections = display;
        self
    }

    /// Set the geometry precision
    #[must_use]
    pub fn with_geometry_precision(mut self, precision: u32) -> Self {
        self.geometry_precision = precision;
        self
    }

    /// Validate option values
    pub fn validate(&self) -> Result<()> {
        if self.out_fields.trim().is_empty() {
            return Err(Error::invalid_value(
                "outFields",
                "must not be empty (use \"*\" for all fields)",
            ));
        }
        if self.geometry_precision > MAX_GEOMETRY_PRECISION {
            return Err(Error::invalid_value(
                "geometryPrecision",
                format!("must be at most {MAX_GEOMETRY_PRECISION}"),
            ));
        }
        Ok(())
    }
}

/// Upper bound on meaningful coordinate decimals
const MAX_GEOMETRY_PRECISION: u32 = 17;

fn default_out_fields() -> String {
    "*".to_string()
}

fn default_true() -> bool {
    true
}

fn default_geometry_precision() -> u32 {
    6
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Transport-level retries per request (0 = a failed request ends the fetch)
    #[serde(default)]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            max_retries: 0,
            retry_backoff: BackoffConfig::default(),
            rate_limit: RateLimitConfig::default(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    500
}

fn default_max_ms() -> u64 {
    30_000
}

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether requests are throttled at all
    #[serde(default)]
    pub enabled: bool,

    /// Requests per second
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default = "default_rps")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            requests_per_second: default_rps(),
            burst_size: default_rps(),
        }
    }
}

fn default_rps() -> u32 {
    5
}

// ============================================================================
// Collector / Output Config
// ============================================================================

/// Collector-level limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorSettings {
    /// Wall-clock budget for the whole fetch, in seconds
    #[serde(default)]
    pub deadline_seconds: Option<u64>,
}

impl CollectorSettings {
    /// The deadline as a duration
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_seconds.map(Duration::from_secs)
    }
}

/// Where the collected features are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Destination file; stdout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Pretty-print the GeoJSON
    #[serde(default)]
    pub pretty: bool,
}

// ============================================================================
// Source Config
// ============================================================================

/// Complete description of one feature source fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Feature layer URL (ending in `/FeatureServer/<n>` or `/MapServer/<n>`)
    pub url: String,

    /// Fetch options
    #[serde(default)]
    pub options: FetchOptions,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Collector limits
    #[serde(default)]
    pub collector: CollectorSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

impl SourceConfig {
    /// Create a source config for a URL with default settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: FetchOptions::default(),
            http: HttpSettings::default(),
            collector: CollectorSettings::default(),
            output: OutputSettings::default(),
        }
    }

    /// Parse a source config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a source config from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the whole config
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::invalid_value("url", "must not be empty"));
        }
        url::Url::parse(&self.url)?;
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.http.rate_limit.enabled && self.http.rate_limit.requests_per_second == 0 {
            return Err(Error::invalid_value(
                "http.rate_limit.requests_per_second",
                "must be greater than zero when rate limiting is enabled",
            ));
        }
        self.options.validate()
    }
}

/// Load a source config from a file (`.json` as JSON, anything else as YAML)
pub fn load_source_config(path: impl AsRef<Path>) -> Result<SourceConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => SourceConfig::from_json_str(&content),
        _ => SourceConfig::from_yaml_str(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_fetch_options_defaults() {
        let options = FetchOptions::default();
        assert_eq!(options.out_fields, "*");
        assert!(options.supports_pagination);
        assert!(options.display_incomplete_feature_collections);
        assert_eq!(options.geometry_precision, 6);
    }

    #[test]
    fn test_fetch_options_camel_case() {
        let options: FetchOptions = serde_json::from_str(
            r#"{
                "geometryPrecision": 5,
                "supportsPagination": false,
                "outFields": "OBJECTID,stationid,stage_ft",
                "displayIncompleteFeatureCollections": false
            }"#,
        )
        .unwrap();

        assert_eq!(
            options,
            FetchOptions::new()
                .with_geometry_precision(5)
                .with_pagination(false)
                .with_out_fields("OBJECTID,stationid,stage_ft")
                .with_progress(false)
        );
    }

    #[test]
    fn test_fetch_options_partial_uses_defaults() {
        let options: FetchOptions = serde_json::from_str(r#"{"geometryPrecision": 3}"#).unwrap();
        assert_eq!(options.geometry_precision, 3);
        assert_eq!(options.out_fields, "*");
        assert!(options.supports_pagination);
    }

    #[test]
    fn test_fetch_options_validate() {
        assert!(FetchOptions::default().validate().is_ok());
        assert!(FetchOptions::new().with_out_fields("  ").validate().is_err());
        assert!(FetchOptions::new()
            .with_geometry_precision(40)
            .validate()
            .is_err());
    }

    #[test]
    fn test_default_http_settings() {
        let http = HttpSettings::default();
        assert_eq!(http.timeout_seconds, 60);
        assert_eq!(http.max_retries, 0);
        assert!(!http.rate_limit.enabled);
        assert_eq!(http.retry_backoff.backoff_type, BackoffType::Exponential);
    }

    #[test]
    fn test_parse_source_yaml() {
        let yaml = r#"
url: https://services9.arcgis.com/abc/arcgis/rest/services/Gauges/FeatureServer/0
options:
  outFields: "OBJECTID,name"
  geometryPrecision: 5
http:
  timeout_seconds: 15
  max_retries: 2
  retry_backoff:
    type: linear
    initial_ms: 100
  rate_limit:
    enabled: true
    requests_per_second: 2
collector:
  deadline_seconds: 300
output:
  path: gauge.geojson
  pretty: true
"#;

        let config = SourceConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.options.out_fields, "OBJECTID,name");
        assert_eq!(config.options.geometry_precision, 5);
        assert!(config.options.supports_pagination);
        assert_eq!(config.http.timeout_seconds, 15);
        assert_eq!(config.http.max_retries, 2);
        assert_eq!(config.http.retry_backoff.backoff_type, BackoffType::Linear);
        assert_eq!(config.http.retry_backoff.max_ms, 30_000);
        assert!(config.http.rate_limit.enabled);
        assert_eq!(config.collector.deadline(), Some(Duration::from_secs(300)));
        assert_eq!(config.output.path, Some(PathBuf::from("gauge.geojson")));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_parse_source_json_minimal() {
        let config =
            SourceConfig::from_json_str(r#"{"url": "https://example.com/FeatureServer/0"}"#)
                .unwrap();
        assert_eq!(config, SourceConfig::new("https://example.com/FeatureServer/0"));
    }

    #[test]
    fn test_source_validation_errors() {
        assert!(matches!(
            SourceConfig::from_yaml_str("url: ''"),
            Err(Error::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            SourceConfig::from_yaml_str("url: not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(SourceConfig::from_yaml_str(
            "url: https://example.com/0\nhttp:\n  timeout_seconds: 0\n"
        )
        .is_err());
    }

    #[test]
    fn test_load_source_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "url: https://example.com/FeatureServer/2").unwrap();

        let config = load_source_config(file.path()).unwrap();
        assert_eq!(config.url, "https://example.com/FeatureServer/2");
    }

    #[test]
    fn test_load_source_config_missing() {
        let result = load_source_config("/definitely/not/here.yaml");
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
