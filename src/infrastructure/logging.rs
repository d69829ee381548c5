//! Logging system configuration and initialization
//!
//! - Console output goes to stderr so stdout stays clean for reports and JSON
//! - Optional file output through a non-blocking appender
//! - Optional JSON formatted records
//! - `RUST_LOG` overrides the configured level and module filters

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub use crate::infrastructure::config::LoggingConfig;
use crate::infrastructure::config::defaults;

// Keeps the file writer alive for the life of the process
static LOG_GUARDS: Lazy<Mutex<Vec<WorkerGuard>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Local-time timestamps with millisecond precision
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Directory log files are written to
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    config.log_directory.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
            .join(defaults::APP_DIR_NAME)
            .join("logs")
    })
}

/// Build the level filter for a config.
///
/// Dependency targets are capped by `module_filters` unless the configured
/// level is `trace`, in which case everything is shown.
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new(defaults::LOG_LEVEL));
    if !config.level.eq_ignore_ascii_case("trace") {
        for (module, level) in &config.module_filters {
            match format!("{module}={level}").parse::<Directive>() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(e) => eprintln!("Ignoring log filter {module}={level}: {e}"),
            }
        }
    }
    filter
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.file_output {
        let log_dir = get_log_directory(config);
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;

        let (file_writer, file_guard) =
            non_blocking(rolling::never(&log_dir, defaults::LOG_FILE_NAME));
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry is poisoned"))?
            .push(file_guard);

        let file_layer = fmt::Layer::new()
            .with_writer(file_writer)
            .with_timer(LocalTimeFormatter)
            .with_ansi(false);
        if config.json_format {
            layers.push(file_layer.json().with_target(true).boxed());
        } else {
            layers.push(file_layer.with_target(false).boxed());
        }
    }

    if config.console_output {
        let console_layer = fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimeFormatter)
            .with_target(false);
        if config.json_format {
            layers.push(console_layer.json().boxed());
        } else {
            layers.push(console_layer.boxed());
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(build_env_filter(config))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
