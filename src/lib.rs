//! product-scraper - single-page e-commerce product scraper
//!
//! Fetches one product page and extracts its title and price using ordered
//! per-site CSS selector tables, with retry, text/price cleaning and currency
//! inference.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{render_json, render_report, EcommerceScraper, ScrapeError};
pub use domain::{detect_currency, Currency, ExtractedProduct, ScrapeRecord};
pub use infrastructure::{AppConfig, ConfigManager, ScraperConfig};
