use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub records: RecordSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Hosted backend holding the legislation table
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "legislation".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordSettings {
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_snapshot_ttl_secs")]
    pub snapshot_ttl_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            snapshot_ttl_secs: default_snapshot_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_refresh_interval_secs() -> u64 { 300 }
fn default_snapshot_ttl_secs() -> u64 { 900 }
fn default_request_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_breed_weight")]
    pub breed_overlap: f64,
    #[serde(default = "default_type_weight")]
    pub legislation_type: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            location: default_location_weight(),
            breed_overlap: default_breed_weight(),
            legislation_type: default_type_weight(),
        }
    }
}

fn default_location_weight() -> f64 { 0.6 }
fn default_breed_weight() -> f64 { 0.3 }
fn default_type_weight() -> f64 { 0.1 }

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_report_floor")]
    pub report_floor: f64,
    #[serde(default = "default_maybe_threshold")]
    pub maybe: f64,
    #[serde(default = "default_likely_threshold")]
    pub likely: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            report_floor: default_report_floor(),
            maybe: default_maybe_threshold(),
            likely: default_likely_threshold(),
        }
    }
}

fn default_report_floor() -> f64 { 0.2 }
fn default_maybe_threshold() -> f64 { 0.4 }
fn default_likely_threshold() -> f64 { 0.8 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with BSL_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with BSL_)
            // e.g., BSL__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("BSL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("BSL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
