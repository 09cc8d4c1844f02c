//! Configuration management.
//!
//! Settings come from an optional TOML file with an environment-variable
//! layer on top (prefix `SCHOLAR_REFS`). Every field has a default, so the
//! tool runs without any configuration at all.
//!
//! ```toml
//! [fetch]
//! overfetch_factor = 2
//! request_timeout_secs = 30
//! requests_per_second = 1.0
//! page_size = 100
//!
//! [export]
//! output_dir = "."
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Retrieval settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// How many candidate records to expand per requested result, to
    /// compensate for entries dropped by the year filter. 0 expands the
    /// whole listing.
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Request rate against the profile source
    #[serde(default = "default_rps")]
    pub requests_per_second: f32,

    /// Profile listing page size
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            overfetch_factor: default_overfetch_factor(),
            request_timeout_secs: default_timeout_secs(),
            requests_per_second: default_rps(),
            page_size: default_page_size(),
        }
    }
}

fn default_overfetch_factor() -> usize {
    2
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_rps() -> f32 {
    1.0
}

fn default_page_size() -> usize {
    100
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the workbook is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a file plus environment overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("SCHOLAR_REFS"))
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the working directory, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("scholar-refs.toml");
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("scholar-refs").join("config.toml");
    if user.is_file() {
        return Some(user);
    }

    None
}
