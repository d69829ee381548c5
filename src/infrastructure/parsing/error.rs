//! Parsing error types
//!
//! Errors raised while turning a response body into a document and
//! compiling selector lists.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("HTML parsing failed: {message}")]
    HtmlParsingFailed { message: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No valid selectors compiled for '{field}' from {attempted} candidates")]
    NoValidSelectors { field: String, attempted: usize },
}

impl ParsingError {
    pub fn html_parsing_failed(message: &str) -> Self {
        Self::HtmlParsingFailed {
            message: message.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
