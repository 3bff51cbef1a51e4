//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_BASE;
use crate::chart::ChartConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Population API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Nothing is logged here since the subscriber is built from the
    /// result; call [`ConfigReport::log`] once logging is up.
    pub fn load_default() -> (Self, ConfigReport) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("pf-data").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing, valid file among `paths`
    pub fn load_first(paths: &[PathBuf]) -> (Self, ConfigReport) {
        let mut report = ConfigReport::default();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    report.source = Some(path.clone());
                    return (config, report);
                }
                Err(e) => report.skipped.push(e),
            }
        }

        (Self::from_env(), report)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PF_DATA_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("PF_DATA_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        if let Some(level) = lookup("PF_DATA_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PF_DATA_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of [`Config::load_default`]
#[derive(Debug, Default)]
pub struct ConfigReport {
    /// File the config was read from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub skipped: Vec<ConfigError>,
}

impl ConfigReport {
    pub fn log(&self) {
        for e in &self.skipped {
            tracing::warn!("Skipping config: {}", e);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# pf-data Configuration
#
# Environment variables override these settings:
# - PF_DATA_API_URL
# - PF_DATA_API_TIMEOUT
# - PF_DATA_LOG_LEVEL
# - PF_DATA_LOG_FORMAT

[api]
# Base address of the population API
base_url = "http://localhost:8080"

# Request timeout in seconds
request_timeout_secs = 30

[chart]
title = "人口推移"
x_axis_title = "西暦（年）"
y_axis_title = "人口数（人）"

# Year of the first point and the spacing between points
base_year = 1960
year_step = 5

# SVG output size in pixels
width = 800
height = 400

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.chart.base_year, 1960);
        assert_eq!(config.chart.year_step, 5);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);
        assert_eq!(config.chart, ChartConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://api.example:9000\"\n\n[chart]\nbase_year = 1980\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://api.example:9000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.chart.base_year, 1980);
        assert_eq!(config.chart.year_step, 5);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nbase_url = ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_first_skips_broken_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[chart\n").unwrap();
        std::fs::write(&good, "[chart]\nyear_step = 10\n").unwrap();

        let (config, report) =
            Config::load_first(&[missing.clone(), broken.clone(), good.clone()]);
        assert_eq!(config.chart.year_step, 10);
        assert_eq!(report.source, Some(good));
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(&report.skipped[0], ConfigError::Parse { path, .. } if *path == broken));

        let (config, report) = Config::load_first(&[missing, broken]);
        assert_eq!(config.chart.year_step, 5);
        assert!(report.source.is_none());
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("PF_DATA_API_URL", "http://10.0.0.2:8080"),
            ("PF_DATA_API_TIMEOUT", "not-a-number"),
            ("PF_DATA_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
