//! Scrape failure taxonomy
//!
//! The orchestrator works in `Result<_, ScrapeError>` internally. At its public
//! boundary every error is rendered into the `error` field of a failed
//! `ScrapeRecord`, so the messages below are part of the output contract.

use thiserror::Error;

use crate::infrastructure::http_client::FetchError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// Rejected before any network activity
    #[error("invalid URL")]
    InvalidUrl,

    /// Every fetch attempt failed; carries the last failure
    #[error("error loading page: {source}")]
    Fetch {
        attempts: u32,
        #[source]
        source: FetchError,
    },

    /// No navigable document was obtained
    #[error("failed to load page")]
    PageNotLoaded,

    /// Page parsed but no selector produced text
    #[error("could not find product elements; selectors may be stale")]
    ExtractionMiss,

    #[error("timeout: scraping took longer than {seconds}s")]
    DeadlineExceeded { seconds: u64 },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}
