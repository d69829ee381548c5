//! Selector configuration for product pages
//!
//! Centralized CSS selector tables per e-commerce site. Lists are ordered
//! most specific first and tried in that order.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Candidate selectors for the two fields we extract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Selectors for the product title
    pub title: Vec<String>,

    /// Selectors for the product price
    pub price: Vec<String>,
}

impl SelectorSet {
    pub fn new(title: &[&str], price: &[&str]) -> Self {
        Self {
            title: title.iter().map(|s| (*s).to_string()).collect(),
            price: price.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Fallback used when no site entry matches the domain
    pub fn generic() -> Self {
        Self::new(
            &["h1", ".title", "[class*=\"title\"]", "[id*=\"title\"]"],
            &["[class*=\"price\"]", "[id*=\"price\"]", ".price", ".cost"],
        )
    }
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self::generic()
    }
}

/// One recognized site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteEntry {
    /// Lowercase substring matched against the request domain
    pub domain_key: String,
    pub name: String,
    pub example_url: String,
    pub selectors: SelectorSet,
}

/// Ordered mapping from domain key to selectors.
///
/// Resolution is substring containment and the first entry wins, so a more
/// specific key has to be declared before any key it contains.
#[derive(Debug, Clone)]
pub struct SiteTable {
    entries: Vec<SiteEntry>,
    fallback: SelectorSet,
}

static BUILTIN_SITES: Lazy<SiteTable> = Lazy::new(|| {
    SiteTable::new(
        vec![
            SiteEntry {
                domain_key: "amazon.com".to_string(),
                name: "Amazon".to_string(),
                example_url: "https://www.amazon.com/dp/B08N5WRWNW".to_string(),
                selectors: SelectorSet::new(
                    &[
                        "#productTitle",
                        ".product-title",
                        "[data-automation-id=\"product-title\"]",
                        ".a-size-large.a-size-base-plus",
                        "h1.a-size-large",
                    ],
                    &[
                        ".a-price-whole",
                        ".a-price .a-offscreen",
                        "#priceblock_dealprice",
                        "#priceblock_saleprice",
                        "#buy-now-button + .a-price .a-offscreen",
                        ".a-price-range .a-price .a-offscreen",
                        "[data-automation-id=\"product-price\"] .a-price .a-offscreen",
                        ".a-price.a-text-price.a-size-medium.apexPriceToPay .a-offscreen",
                    ],
                ),
            },
            SiteEntry {
                domain_key: "ebay.com".to_string(),
                name: "eBay".to_string(),
                example_url: "https://www.ebay.com/itm/123456789".to_string(),
                selectors: SelectorSet::new(
                    &[
                        "#x-title-label-lbl",
                        ".x-title-label-lbl",
                        "h1[data-testid=\"lot-title\"]",
                        ".notranslate",
                        "h1.it-ttl",
                    ],
                    &[
                        ".notranslate .notranslate",
                        "[data-testid=\"lot-price\"] .notranslate",
                        ".u-flL.condText",
                        "#prcIsum",
                        ".u-flL .notranslate",
                    ],
                ),
            },
            SiteEntry {
                domain_key: "mercadolibre.com.mx".to_string(),
                name: "MercadoLibre México".to_string(),
                example_url: "https://www.mercadolibre.com.mx/producto".to_string(),
                selectors: SelectorSet::new(
                    &[".ui-pdp-title", "h1.ui-pdp-title", ".item-title__primary"],
                    &[
                        ".andes-money-amount__fraction",
                        ".price-tag-fraction",
                        ".ui-pdp-price__fraction",
                    ],
                ),
            },
            SiteEntry {
                domain_key: "mercadolibre.com".to_string(),
                name: "MercadoLibre".to_string(),
                example_url: "https://www.mercadolibre.com.ar/producto".to_string(),
                selectors: SelectorSet::new(
                    &[
                        ".ui-pdp-title",
                        "h1.ui-pdp-title",
                        ".item-title__primary",
                        ".item-title",
                    ],
                    &[
                        ".andes-money-amount__fraction",
                        ".price-tag-fraction",
                        ".ui-pdp-price__fraction",
                        ".price-tag .price-tag-fraction",
                    ],
                ),
            },
        ],
        SelectorSet::generic(),
    )
});

impl SiteTable {
    pub const fn new(entries: Vec<SiteEntry>, fallback: SelectorSet) -> Self {
        Self { entries, fallback }
    }

    /// Table of sites the scraper ships with
    pub fn builtin() -> &'static Self {
        &BUILTIN_SITES
    }

    /// First entry whose key is contained in `domain`, case-insensitively
    pub fn lookup(&self, domain: &str) -> Option<&SiteEntry> {
        let domain = domain.to_lowercase();
        self.entries
            .iter()
            .find(|entry| domain.contains(entry.domain_key.as_str()))
    }

    /// Selectors for `domain`, or the generic fallback
    pub fn resolve(&self, domain: &str) -> &SelectorSet {
        self.lookup(domain)
            .map_or(&self.fallback, |entry| &entry.selectors)
    }

    pub fn entries(&self) -> &[SiteEntry] {
        &self.entries
    }
}

/// Selectors for `domain` from the built-in table
pub fn site_selectors(domain: &str) -> SelectorSet {
    SiteTable::builtin().resolve(domain).clone()
}

/// Sites with dedicated selector lists, in resolution order
pub fn supported_sites() -> &'static [SiteEntry] {
    SiteTable::builtin().entries()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("amazon.com", "#productTitle", ".a-price-whole")]
    #[case("amazon.com.mx", "#productTitle", ".a-price-whole")]
    #[case("smile.AMAZON.com", "#productTitle", ".a-price-whole")]
    #[case("ebay.com", "#x-title-label-lbl", ".notranslate .notranslate")]
    #[case("mercadolibre.com.ar", ".ui-pdp-title", ".andes-money-amount__fraction")]
    fn test_known_sites_resolve(#[case] domain: &str, #[case] first_title: &str, #[case] first_price: &str) {
        let selectors = site_selectors(domain);
        assert_eq!(selectors.title[0], first_title);
        assert_eq!(selectors.price[0], first_price);
    }

    #[test]
    fn test_amazon_lists_keep_declared_order() {
        let selectors = site_selectors("amazon.com");
        assert_eq!(selectors.title.len(), 5);
        assert_eq!(selectors.title[4], "h1.a-size-large");
        assert_eq!(selectors.price.len(), 8);
        assert_eq!(selectors.price[1], ".a-price .a-offscreen");
        assert_eq!(
            selectors.price[7],
            ".a-price.a-text-price.a-size-medium.apexPriceToPay .a-offscreen"
        );
    }

    #[test]
    fn test_mexican_mercadolibre_uses_its_own_entry() {
        let mx = site_selectors("mercadolibre.com.mx");
        assert_eq!(mx.title.len(), 3);
        assert_eq!(mx.price.len(), 3);

        let ar = site_selectors("mercadolibre.com.ar");
        assert_eq!(ar.title.last().map(String::as_str), Some(".item-title"));
        assert_eq!(ar.price.len(), 4);
    }

    #[test]
    fn test_unknown_domain_gets_generic_fallback() {
        let selectors = site_selectors("shop.example.org");
        assert_eq!(selectors, SelectorSet::generic());
        assert_eq!(selectors.title, ["h1", ".title", "[class*=\"title\"]", "[id*=\"title\"]"]);
        assert_eq!(selectors.price, ["[class*=\"price\"]", "[id*=\"price\"]", ".price", ".cost"]);
    }

    #[test]
    fn test_custom_table_first_match_wins() {
        let table = SiteTable::new(
            vec![
                SiteEntry {
                    domain_key: "shop.com".into(),
                    name: "Shop".into(),
                    example_url: "https://shop.com/p".into(),
                    selectors: SelectorSet::new(&[".a"], &[".b"]),
                },
                SiteEntry {
                    domain_key: "shop.com.mx".into(),
                    name: "Shop MX".into(),
                    example_url: "https://shop.com.mx/p".into(),
                    selectors: SelectorSet::new(&[".c"], &[".d"]),
                },
            ],
            SelectorSet::generic(),
        );
        // the broader key is declared first, so it shadows the .mx entry
        assert_eq!(table.resolve("shop.com.mx").title, [".a"]);
        assert_eq!(table.lookup("other.net"), None);
    }

    #[test]
    fn test_supported_sites_listing() {
        let keys: Vec<_> = supported_sites().iter().map(|s| s.domain_key.as_str()).collect();
        assert_eq!(keys, ["amazon.com", "ebay.com", "mercadolibre.com.mx", "mercadolibre.com"]);
    }
}
