//! Scraping utilities
//!
//! Browser-like request headers, text and price normalization, URL checks and
//! retry jitter. Everything here is total over its input: callers get empty or
//! `None` values back, never errors.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::entropy::Entropy;
use super::parsing::SiteTable;

/// Header name to value, as sent with a page request
pub type RequestHeaders = BTreeMap<&'static str, String>;

/// Desktop and mobile browser user agents rotated between requests
pub const USER_AGENT_POOL: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.67",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Mobile/15E148 Safari/604.1",
];

/// Default bounds for the pause between failed fetch attempts, in seconds
pub const DEFAULT_MIN_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_MAX_DELAY_SECS: f64 = 3.0;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x1f\x7f-\x9f]").expect("valid regex"));

/// Currency-anchored price patterns, tried in order
static PRICE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\$[\d,]+\.?\d*",
        r"€[\d,]+\.?\d*",
        r"[\d,]+\.?\d*\s*USD",
        r"[\d,]+\.?\d*\s*EUR",
        r"[\d,]+\.?\d*\s*MXN",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Bare amount used when no currency-anchored pattern matches
static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d,]+\.?\d+").expect("valid regex"));

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://(?:[-\w.])+(?::[0-9]+)?(?:/(?:[\w/_.])*(?:\?(?:[\w&=%.])*)?(?:#(?:[\w.])*)?)?$",
    )
    .expect("valid regex")
});

/// Realistic browser headers with a user agent picked from the pool
pub fn random_headers(entropy: &mut dyn Entropy) -> RequestHeaders {
    let user_agent = USER_AGENT_POOL[entropy.next_index(USER_AGENT_POOL.len())];

    let mut headers = RequestHeaders::new();
    headers.insert("User-Agent", user_agent.to_string());
    headers.insert(
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".to_string(),
    );
    headers.insert("Accept-Language", "en-US,en;q=0.5".to_string());
    headers.insert("Accept-Encoding", "gzip, deflate".to_string());
    headers.insert("Connection", "keep-alive".to_string());
    headers.insert("Upgrade-Insecure-Requests", "1".to_string());
    headers.insert("Sec-Fetch-Dest", "document".to_string());
    headers.insert("Sec-Fetch-Mode", "navigate".to_string());
    headers.insert("Sec-Fetch-Site", "none".to_string());
    headers.insert("Cache-Control", "max-age=0".to_string());
    headers
}

/// Collapse whitespace, trim, and drop C0/C1 control characters
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let collapsed = WHITESPACE_RUN.replace_all(text.trim(), " ");
    let without_controls = CONTROL_CHARS.replace_all(&collapsed, "");
    without_controls.trim().to_string()
}

/// Pull the price portion out of scraped price text.
///
/// Thousands grouping is not validated, so `1,2,3.45` is accepted as is.
pub fn clean_price(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    if let Some(found) = PRICE_PATTERNS.iter().find_map(|pattern| pattern.find(text)) {
        return Some(found.as_str().to_string());
    }

    if let Some(found) = BARE_NUMBER.find(text) {
        return Some(found.as_str().to_string());
    }

    Some(text.trim().to_string())
}

/// Host part of a URL without scheme, `www.` prefix or path, lowercased
pub fn extract_domain(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);
    let host = without_www.split('/').next().unwrap_or_default();
    host.to_lowercase()
}

/// Site recorded for `url`: its domain, or empty when the URL is rejected
pub fn record_site(url: &str) -> String {
    if validate_url(url) {
        extract_domain(url)
    } else {
        String::new()
    }
}

/// Whether `url` is an http(s) URL the scraper is willing to request
pub fn validate_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

/// Uniformly distributed pause length between `min` and `max` seconds
pub fn random_delay(entropy: &mut dyn Entropy, min: f64, max: f64) -> f64 {
    (max - min).mul_add(entropy.next_f64(), min)
}

/// Whether the URL resolves to a dedicated selector table rather than the fallback
pub fn is_supported_site(url: &str) -> bool {
    SiteTable::builtin().lookup(&extract_domain(url)).is_some()
}
