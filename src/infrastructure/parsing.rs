//! HTML parsing infrastructure
//!
//! Selector tables, document parsing and first-match field extraction.

pub mod config;
pub mod error;
pub mod product_page_parser;

// Re-export public types
pub use config::{site_selectors, supported_sites, SelectorSet, SiteEntry, SiteTable};
pub use error::{ParsingError, ParsingResult};
pub use product_page_parser::{parse_document, ProductPageParser, RawProductFields};
