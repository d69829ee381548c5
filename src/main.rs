//! Command line entry point for product-scraper
//!
//! Progress messages and logs go to stderr; stdout carries only the report or
//! the JSON record so the output can be piped.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::{debug, warn};

use product_scraper_lib::application::{render_json, render_report, EcommerceScraper, ScrapeError};
use product_scraper_lib::domain::ScrapeRecord;
use product_scraper_lib::infrastructure::config::{AppConfig, ConfigManager, ScraperConfig};
use product_scraper_lib::infrastructure::logging::init_logging_with_config;
use product_scraper_lib::infrastructure::parsing::supported_sites;
use product_scraper_lib::infrastructure::scraping_utils::record_site;

#[derive(Parser, Debug)]
#[command(name = "product-scraper", version)]
#[command(about = "Extract the title and price of an e-commerce product page")]
struct Cli {
    /// Product page URL
    #[arg(required_unless_present_any = ["list_sites", "init_config"])]
    url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Number of fetch attempts
    #[arg(long)]
    retries: Option<u32>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Give up on the whole scrape after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    deadline: Option<u64>,

    /// List sites with dedicated selectors and exit
    #[arg(long)]
    list_sites: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(timeout) = self.timeout {
            config.scraper.timeout_seconds = timeout;
        }
        if let Some(retries) = self.retries {
            config.scraper.retries = retries;
        }
        if let Some(deadline) = self.deadline {
            config.scraper.overall_timeout_seconds = Some(deadline);
        }
    }
}

/// Config file manager for `--config`, or the default location
fn config_manager(cli: &Cli) -> Result<ConfigManager> {
    match &cli.config {
        Some(path) => Ok(ConfigManager::with_path(path)),
        None => ConfigManager::new(),
    }
}

/// Loaded configuration with CLI overrides applied.
///
/// A configuration that cannot be loaded is replaced by the defaults; the
/// error is handed back so it can be logged once logging is up.
fn effective_config(
    cli: &Cli,
    manager: &Result<ConfigManager>,
) -> (AppConfig, Option<anyhow::Error>) {
    let loaded = manager
        .as_ref()
        .map_err(|e| anyhow!("{e:#}"))
        .and_then(ConfigManager::load_config);

    let (mut config, error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    cli.apply_overrides(&mut config);
    (config, error)
}

/// Scrape `url`, turning a scraper that cannot be built into a failed record
async fn scrape(config: ScraperConfig, url: &str) -> ScrapeRecord {
    match EcommerceScraper::new(config) {
        Ok(mut scraper) => scraper.scrape_product(url).await,
        Err(e) => {
            warn!("Could not create scraper: {:#}", e);
            let error = ScrapeError::Unexpected(format!("{e:#}"));
            ScrapeRecord::failed(url, &record_site(url), error.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let manager = config_manager(&cli);
    let (config, load_error) = effective_config(&cli, &manager);

    if let Err(e) = init_logging_with_config(&config.logging) {
        eprintln!("Logging disabled: {e}");
    }
    if let Some(e) = load_error {
        warn!("⚠️ Using default configuration: {:#}", e);
    }
    debug!("Effective configuration: {:?}", config);

    if cli.init_config {
        let manager = manager?;
        manager.save_config(&config).await?;
        println!("{}", manager.config_path().display());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.list_sites {
        for site in supported_sites() {
            println!("{:<16} {:<22} {}", site.name, site.domain_key, site.example_url);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let url = cli.url.as_deref().unwrap_or_default();

    if !cli.json {
        eprintln!("🚀 Starting web scraping...");
        eprintln!("🎯 Target URL: {url}");
        eprintln!("⏳ Processing...");
    }

    let record = scrape(config.scraper, url).await;

    if cli.json {
        println!("{}", render_json(&record));
    } else {
        print!("{}", render_report(&record));
    }

    Ok(if record.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
