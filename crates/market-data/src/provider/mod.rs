//! Upstream fetch clients.
//!
//! One provider per upstream: [`BonbastProvider`] scrapes the bonbast.com
//! HTML site, [`WallexProvider`] queries the Wallex market API.

pub mod bonbast;
pub mod wallex;

pub use bonbast::BonbastProvider;
pub use wallex::WallexProvider;

use std::time::Duration;

/// Default HTTP request timeout for upstream calls.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
