//! Domain module - scrape results and currency rules
//!
//! Each module is its own file in the domain/ directory;
//! commonly used items are re-exported here for convenience.

pub mod currency;
pub mod product;

pub use currency::{detect_currency, Currency};
pub use product::{ExtractedProduct, ScrapeRecord};
