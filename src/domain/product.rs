//! Scrape result record
//!
//! One `ScrapeRecord` is produced per scrape call. It is always complete:
//! failures are carried in `success`/`error` instead of escaping as errors.

use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// Outcome of scraping a single product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRecord {
    pub success: bool,
    pub url: String,
    pub title: Option<String>,
    pub price: Option<String>,
    pub currency: Option<Currency>,
    /// Normalized domain of `url`; empty when the URL was rejected
    pub site: String,
    pub error: Option<String>,
    /// Unix seconds at which the record was finalized
    pub timestamp: i64,
}

/// Fields pulled out of a product page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedProduct {
    pub title: Option<String>,
    pub price: Option<String>,
    pub currency: Option<Currency>,
}

impl ExtractedProduct {
    /// At least one of title or price was found
    pub const fn has_content(&self) -> bool {
        self.title.is_some() || self.price.is_some()
    }
}

impl ScrapeRecord {
    /// Successful record stamped with the current time
    pub fn succeeded(url: &str, site: &str, product: ExtractedProduct) -> Self {
        Self {
            success: true,
            url: url.to_string(),
            title: product.title,
            price: product.price,
            currency: product.currency,
            site: site.to_string(),
            error: None,
            timestamp: now_unix(),
        }
    }

    /// Failed record stamped with the current time
    pub fn failed(url: &str, site: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: url.to_string(),
            title: None,
            price: None,
            currency: None,
            site: site.to_string(),
            error: Some(error.into()),
            timestamp: now_unix(),
        }
    }

    /// Copy of this record with the timestamp zeroed, for comparisons
    pub fn without_timestamp(&self) -> Self {
        Self {
            timestamp: 0,
            ..self.clone()
        }
    }
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
