//! Infrastructure layer for HTTP, parsing, configuration and logging
//!
//! This module provides the reqwest page fetcher, HTML selector extraction,
//! text normalization helpers and the ambient config/logging setup.

pub mod config; // Configuration loading and defaults
pub mod entropy; // Injected randomness
pub mod http_client;
pub mod logging; // Logging infrastructure
pub mod parsing; // Selector tables and document extraction
pub mod scraping_utils;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, LoggingConfig, ScraperConfig};
pub use entropy::{system_entropy, Entropy, FixedEntropy};
pub use http_client::{FetchError, FetchedPage, HttpClient, HttpClientConfig, PageFetcher};
pub use logging::init_logging_with_config;
pub use parsing::{site_selectors, supported_sites, ParsingError, SelectorSet, SiteEntry, SiteTable};
pub use scraping_utils::{
    clean_price, clean_text, extract_domain, is_supported_site, random_delay, random_headers,
    record_site, validate_url, RequestHeaders,
};
