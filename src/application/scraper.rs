//! Product page scraper
//!
//! Drives one scrape through validation, fetch-with-retry, extraction and
//! result assembly. `scrape_product` always returns a complete
//! `ScrapeRecord`; every failure is classified as a `ScrapeError` and folded
//! into the record at the end.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::error::ScrapeError;
use crate::domain::{detect_currency, ExtractedProduct, ScrapeRecord};
use crate::infrastructure::config::ScraperConfig;
use crate::infrastructure::entropy::{system_entropy, Entropy};
use crate::infrastructure::http_client::{FetchedPage, HttpClient, HttpClientConfig, PageFetcher};
use crate::infrastructure::parsing::{parse_document, ProductPageParser, SelectorSet, SiteTable};
use crate::infrastructure::scraping_utils::{
    clean_price, clean_text, random_delay, random_headers, record_site, validate_url,
};

/// Scraper for single e-commerce product pages.
///
/// Holds the HTTP collaborator and randomness source for its lifetime so the
/// connection pool is reused between sequential calls.
pub struct EcommerceScraper {
    fetcher: Box<dyn PageFetcher>,
    entropy: Box<dyn Entropy>,
    sites: &'static SiteTable,
    config: ScraperConfig,
}

impl EcommerceScraper {
    /// Scraper backed by the reqwest client and OS-seeded randomness
    pub fn new(config: ScraperConfig) -> anyhow::Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig::from_scraper_config(&config))?;
        Ok(Self::with_parts(Box::new(client), system_entropy(), config))
    }

    /// Scraper with explicit collaborators
    pub fn with_parts(
        fetcher: Box<dyn PageFetcher>,
        entropy: Box<dyn Entropy>,
        config: ScraperConfig,
    ) -> Self {
        Self {
            fetcher,
            entropy,
            sites: SiteTable::builtin(),
            config,
        }
    }

    pub const fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Scrape title and price from a product page
    pub async fn scrape_product(&mut self, url: &str) -> ScrapeRecord {
        let site = record_site(url);

        let outcome = match self.config.overall_timeout_seconds {
            Some(seconds) => {
                tokio::time::timeout(Duration::from_secs(seconds), self.run(url, &site))
                    .await
                    .unwrap_or(Err(ScrapeError::DeadlineExceeded { seconds }))
            }
            None => self.run(url, &site).await,
        };

        match outcome {
            Ok(product) => {
                info!(
                    "✅ Scraped {} (title: {}, price: {})",
                    url,
                    product.title.is_some(),
                    product.price.is_some()
                );
                ScrapeRecord::succeeded(url, &site, product)
            }
            Err(error) => {
                warn!("❌ Scrape failed for {}: {}", url, error);
                ScrapeRecord::failed(url, &site, error.to_string())
            }
        }
    }

    async fn run(&mut self, url: &str, site: &str) -> Result<ExtractedProduct, ScrapeError> {
        if !validate_url(url) {
            return Err(ScrapeError::InvalidUrl);
        }

        let selectors = self.sites.resolve(site).clone();
        debug!(
            "Resolved {} title / {} price selectors for {}",
            selectors.title.len(),
            selectors.price.len(),
            site
        );

        let page = self.fetch_with_retry(url).await?;
        extract_product(&page, &selectors, site)
    }

    /// Fetch `url`, retrying failed attempts with a jittered pause in between
    async fn fetch_with_retry(&mut self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let attempts = self.config.retries;
        let timeout = self.config.request_timeout();
        let mut last_error = None;

        for attempt in 1..=attempts {
            let headers = random_headers(self.entropy.as_mut());
            info!("🔄 Fetch attempt {}/{}: {}", attempt, attempts, url);

            match self.fetcher.get(url, &headers, timeout).await {
                Ok(page) => return Ok(page),
                Err(error) => {
                    warn!("Attempt {}/{} failed: {}", attempt, attempts, error);
                    last_error = Some(error);

                    if attempt < attempts {
                        let seconds = random_delay(
                            self.entropy.as_mut(),
                            self.config.retry_delay_min_seconds,
                            self.config.retry_delay_max_seconds,
                        );
                        let pause = Duration::try_from_secs_f64(seconds).unwrap_or_default();
                        debug!("Waiting {:?} before retrying", pause);
                        tokio::time::sleep(pause).await;
                    }
                }
            }
        }

        Err(last_error.map_or(ScrapeError::PageNotLoaded, |source| ScrapeError::Fetch {
            attempts,
            source,
        }))
    }
}

/// Parse a fetched page and pull the cleaned product fields out of it
fn extract_product(
    page: &FetchedPage,
    selectors: &SelectorSet,
    domain: &str,
) -> Result<ExtractedProduct, ScrapeError> {
    let document = parse_document(&page.body).map_err(|e| {
        warn!("Could not parse {}: {}", page.final_url, e);
        ScrapeError::PageNotLoaded
    })?;

    let parser = ProductPageParser::with_selectors(selectors)
        .map_err(|e| ScrapeError::Unexpected(e.to_string()))?;
    let raw = parser.parse(&document);

    let title = raw
        .title
        .map(|text| clean_text(&text))
        .filter(|text| !text.is_empty());
    let price = raw.price.and_then(|text| clean_price(&text));
    let currency = price.as_deref().map(|text| detect_currency(text, domain));

    let product = ExtractedProduct {
        title,
        price,
        currency,
    };

    if product.has_content() {
        Ok(product)
    } else {
        Err(ScrapeError::ExtractionMiss)
    }
}
