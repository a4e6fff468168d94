//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::{DashboardSettings, RefreshConfig};
use crate::proxy::ProxyConfig;
use crate::validate::AllowedDateRange;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend proxy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8006".to_string()
}

fn default_request_timeout() -> u64 {
    10_000 // 10 seconds
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Dashboard behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Allowed-range fallback used when `/api/date-range` cannot be fetched
    #[serde(default = "default_fallback_start")]
    pub fallback_start: String,

    #[serde(default = "default_fallback_end")]
    pub fallback_end: String,
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_fallback_start() -> String {
    "2025-07-26".to_string()
}

fn default_fallback_end() -> String {
    "2025-09-24".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            fallback_start: default_fallback_start(),
            fallback_end: default_fallback_end(),
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

    pub file: Option<String>,
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
            file: None,
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("vigil").join("config.toml")),
            Some(PathBuf::from("/etc/vigil/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Backend overrides
        if let Ok(url) = std::env::var("VIGIL_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(timeout) = std::env::var("VIGIL_BACKEND_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.backend.request_timeout_ms = t;
            }
        }

        // Dashboard overrides
        if let Ok(interval) = std::env::var("VIGIL_REFRESH_INTERVAL") {
            if let Ok(i) = interval.parse() {
                self.dashboard.refresh_interval_secs = i;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("VIGIL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("VIGIL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Proxy client configuration slice
    pub fn proxy_config(&self) -> ProxyConfig {
        ProxyConfig {
            base_url: self.backend.base_url.clone(),
            request_timeout_ms: self.backend.request_timeout_ms,
        }
    }

    /// Auto-refresh configuration slice
    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            interval_secs: self.dashboard.refresh_interval_secs,
        }
    }

    /// Controller settings, validating the fallback range
    pub fn dashboard_settings(&self) -> Result<DashboardSettings, ConfigError> {
        let fallback_range = AllowedDateRange::parse(
            &self.dashboard.fallback_start,
            &self.dashboard.fallback_end,
        )
        .map_err(|e| ConfigError::Invalid {
            field: "dashboard.fallback_start/fallback_end".to_string(),
            error: e.to_string(),
        })?;

        Ok(DashboardSettings { fallback_range })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
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

    #[error("Invalid value for {field}: {error}")]
    Invalid { field: String, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Vigil Configuration
#
# Environment variables override these settings:
# - VIGIL_BACKEND_URL
# - VIGIL_BACKEND_TIMEOUT_MS
# - VIGIL_REFRESH_INTERVAL
# - VIGIL_LOG_LEVEL
# - VIGIL_LOG_FORMAT

[backend]
# Dashboard proxy base URL
base_url = "http://127.0.0.1:8006"

# Request timeout (ms)
request_timeout_ms = 10000

[dashboard]
# Auto-refresh interval (seconds)
refresh_interval_secs = 30

# Allowed date range fallback, used when /api/date-range is unreachable
fallback_start = "2025-07-26"
fallback_end = "2025-09-24"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/vigil/vigil.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8006");
        assert_eq!(config.dashboard.refresh_interval_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[backend]
base_url = "http://10.0.0.5:9000"

[dashboard]
refresh_interval_secs = 5
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.dashboard.refresh_interval_secs, 5);
        // Unspecified sections keep their defaults.
        assert_eq!(config.backend.request_timeout_ms, 10_000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "backend = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_generated_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.dashboard.fallback_start, "2025-07-26");
        assert!(config.dashboard_settings().is_ok());
    }

    #[test]
    fn test_bad_fallback_range_rejected() {
        let config = Config {
            dashboard: DashboardConfig {
                fallback_start: "2025-09-24".to_string(),
                fallback_end: "2025-07-26".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.dashboard_settings(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
