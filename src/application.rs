//! Application layer
//!
//! The scrape orchestrator, its error taxonomy and output rendering.

pub mod error;
pub mod report;
pub mod scraper;

pub use error::ScrapeError;
pub use report::{render_json, render_report};
pub use scraper::EcommerceScraper;
