//! Product page parser
//!
//! Compiles a `SelectorSet` once and pulls the title and raw price text out of
//! a parsed document. Each list is scanned in order and the first selector
//! whose first matching element has non-empty text wins.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::config::SelectorSet;
use super::error::{ParsingError, ParsingResult};

/// Raw (uncleaned) field text found on a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProductFields {
    pub title: Option<String>,
    pub price: Option<String>,
}

/// Parser for the title and price of a single product page
pub struct ProductPageParser {
    title_selectors: Vec<Selector>,
    price_selectors: Vec<Selector>,
}

impl ProductPageParser {
    /// Create parser with the given selector configuration
    pub fn with_selectors(selectors: &SelectorSet) -> ParsingResult<Self> {
        Ok(Self {
            title_selectors: Self::compile_selectors("title", &selectors.title)?,
            price_selectors: Self::compile_selectors("price", &selectors.price)?,
        })
    }

    /// Compile selector strings, skipping the ones the CSS parser rejects
    fn compile_selectors(field: &str, selector_strings: &[String]) -> ParsingResult<Vec<Selector>> {
        let mut selectors = Vec::with_capacity(selector_strings.len());

        for selector_str in selector_strings {
            match Selector::parse(selector_str) {
                Ok(selector) => selectors.push(selector),
                Err(e) => {
                    let error = ParsingError::invalid_selector(selector_str, &e.to_string());
                    warn!("Skipping {} selector: {}", field, error);
                }
            }
        }

        if selectors.is_empty() && !selector_strings.is_empty() {
            return Err(ParsingError::NoValidSelectors {
                field: field.to_string(),
                attempted: selector_strings.len(),
            });
        }

        Ok(selectors)
    }

    /// Extract title and price text from a parsed document
    pub fn parse(&self, html: &Html) -> RawProductFields {
        RawProductFields {
            title: Self::extract_first(html, "title", &self.title_selectors),
            price: Self::extract_first(html, "price", &self.price_selectors),
        }
    }

    fn extract_first(html: &Html, field_name: &str, selectors: &[Selector]) -> Option<String> {
        for (i, selector) in selectors.iter().enumerate() {
            if let Some(element) = html.select(selector).next() {
                let text = stripped_text(element);
                if !text.is_empty() {
                    debug!("Extracted {} using selector {}: {}", field_name, i, text);
                    return Some(text);
                }
            }
        }

        debug!("Failed to extract {} using {} selectors", field_name, selectors.len());
        None
    }
}

/// Text of an element with every text node trimmed and joined without separators
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Parse a decoded response body into a navigable document.
///
/// Bodies that are empty or whitespace only carry no document to navigate and
/// are rejected; everything else goes through the lenient HTML5 parser.
pub fn parse_document(body: &str) -> ParsingResult<Html> {
    if body.trim().is_empty() {
        return Err(ParsingError::html_parsing_failed("response body is empty"));
    }
    Ok(Html::parse_document(body))
}
