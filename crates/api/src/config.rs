//! Application Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `STUDENT_RECORDS_*` environment variables.

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::rate_limit::RateLimitConfig;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "STUDENT_RECORDS_CONFIG";

/// Config file used when `STUDENT_RECORDS_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "student-records.toml";

/// Prefix for environment overrides, e.g. `STUDENT_RECORDS_DATA_FILE`
const ENV_PREFIX: &str = "STUDENT_RECORDS";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// JSON file holding every student record
    pub data_file: PathBuf,
    /// Maximum log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
    /// Per-IP rate limiting
    pub rate_limit: RateLimitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            data_file: PathBuf::from("data.json"),
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: false,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `STUDENT_RECORDS_CONFIG` (or the default
    /// file name) plus environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load from `path` plus environment overrides; a missing file is fine
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let path = std::env::temp_dir().join(format!("missing-{}.toml", uuid::Uuid::new_v4()));
        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.data_file, PathBuf::from("data.json"));
        assert_eq!(config.log_level, "info");
        assert!(!config.metrics_enabled);
        assert!(!config.rate_limit.enabled);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("student-records-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
bind_addr = "127.0.0.1:9000"
data_file = "/var/lib/students/data.json"
metrics_enabled = true

[rate_limit]
enabled = true
burst_size = 20
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.data_file, PathBuf::from("/var/lib/students/data.json"));
        assert_eq!(config.log_level, "info");
        assert!(config.metrics_enabled);
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.burst_size, 20);
        assert_eq!(config.rate_limit.per_second, RateLimitConfig::default().per_second);

        std::fs::remove_file(path).unwrap();
    }
}
