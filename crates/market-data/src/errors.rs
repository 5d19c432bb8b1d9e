//! Error types for upstream fetching and parsing.

use thiserror::Error;

/// Errors that can occur while fetching or parsing upstream data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// An HTML crawl returned a non-200 status.
    /// Surfaces as a generic server error at the API layer.
    #[error("Failed to crawl {url}")]
    Crawl {
        /// The crawled URL
        url: String,
    },

    /// The crypto API returned a non-2xx status.
    /// The API layer propagates this status to the client.
    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus {
        /// The requested URL
        url: String,
        /// The upstream HTTP status code
        status: u16,
    },

    /// A crawled page contained no `<table>` element.
    #[error("No table found in response from {url}")]
    MissingTable {
        /// The crawled URL
        url: String,
    },

    /// The provider main page did not contain a session token.
    #[error("Session token not found on main page")]
    TokenNotFound,

    /// A JSON body was missing an expected field.
    #[error("Unexpected upstream payload: {0}")]
    UnexpectedPayload(String),

    /// A transport-level error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
