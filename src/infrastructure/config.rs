//! Configuration infrastructure
//!
//! Settings are layered, lowest priority first:
//! 1. Built-in defaults (`defaults` module)
//! 2. Optional JSON config file
//! 3. `PRODUCT_SCRAPER__*` environment variables
//!
//! Command line flags are applied on top by the binary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fetch and retry behavior
    pub scraper: ScraperConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Fetch and retry settings for a scrape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Fetch attempts per scrape
    pub retries: u32,

    /// Lower bound of the pause between failed attempts, in seconds
    pub retry_delay_min_seconds: f64,

    /// Upper bound of the pause between failed attempts, in seconds
    pub retry_delay_max_seconds: f64,

    /// Whether to follow redirects
    pub follow_redirects: bool,

    /// Maximum redirects followed per request
    pub max_redirects: usize,

    /// Wall-clock limit for a whole scrape; `None` disables it
    pub overall_timeout_seconds: Option<u64>,
}

impl ScraperConfig {
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console (stderr) output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to the user's local data dir
    pub log_directory: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            retries: defaults::RETRIES,
            retry_delay_min_seconds: defaults::RETRY_DELAY_MIN_SECONDS,
            retry_delay_max_seconds: defaults::RETRY_DELAY_MAX_SECONDS,
            follow_redirects: defaults::FOLLOW_REDIRECTS,
            max_redirects: defaults::MAX_REDIRECTS,
            overall_timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_directory: None,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "warn".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("h2".to_string(), "warn".to_string());
                filters.insert("html5ever".to_string(), "error".to_string());
                filters
            },
        }
    }
}

/// Loads and saves `AppConfig`
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Manager for the default config file location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Manager for an explicit config file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration; a missing file is not an error
    pub fn load_config(&self) -> Result<AppConfig> {
        let defaults = config::Config::try_from(&AppConfig::default())
            .context("Failed to build default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(self.config_path.as_path())
                    .format(config::FileFormat::Json)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration file {:?}", self.config_path))?;

        let app_config: AppConfig = settings.try_deserialize().with_context(|| {
            format!(
                "Invalid configuration value in {:?} or {}__* environment variables",
                self.config_path,
                defaults::ENV_PREFIX
            )
        })?;

        info!("Loaded configuration (file: {:?})", self.config_path);
        Ok(app_config)
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }
}

/// Default configuration values
pub mod defaults {
    /// Directory name under the user's config/data dirs
    pub const APP_DIR_NAME: &str = "product-scraper";

    /// Config file name inside the config dir
    pub const CONFIG_FILE_NAME: &str = "product_scraper_config.json";

    /// Environment variable prefix, e.g. `PRODUCT_SCRAPER__SCRAPER__RETRIES=5`
    pub const ENV_PREFIX: &str = "PRODUCT_SCRAPER";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 15;

    /// Default fetch attempts
    pub const RETRIES: u32 = 3;

    pub const RETRY_DELAY_MIN_SECONDS: f64 = 1.0;
    pub const RETRY_DELAY_MAX_SECONDS: f64 = 3.0;

    pub const FOLLOW_REDIRECTS: bool = true;
    pub const MAX_REDIRECTS: usize = 10;

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Log file name
    pub const LOG_FILE_NAME: &str = "product-scraper.log";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.scraper.timeout_seconds, 15);
        assert_eq!(config.scraper.retries, 3);
        assert_eq!(config.scraper.request_timeout(), Duration::from_secs(15));
        assert!(config.scraper.follow_redirects);
        assert!(config.scraper.overall_timeout_seconds.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("absent.json"));
        let config = manager.load_config().unwrap();
        assert_eq!(config.scraper, ScraperConfig::default());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "scraper": { "retries": 5, "overall_timeout_seconds": 30 }, "logging": { "level": "debug" } }"#,
        )
        .unwrap();

        let config = ConfigManager::with_path(&path).load_config().unwrap();
        assert_eq!(config.scraper.retries, 5);
        assert_eq!(config.scraper.overall_timeout_seconds, Some(30));
        assert_eq!(config.scraper.timeout_seconds, 15);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "scraper": { "retries": "many" } }"#).unwrap();
        assert!(ConfigManager::with_path(&path).load_config().is_err());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("nested").join("config.json"));

        let mut config = AppConfig::default();
        config.scraper.timeout_seconds = 42;
        manager.save_config(&config).await.unwrap();

        let loaded = manager.load_config().unwrap();
        assert_eq!(loaded.scraper.timeout_seconds, 42);
    }
}
