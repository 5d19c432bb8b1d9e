//! Nerkh market data crate.
//!
//! Fetches Iranian currency exchange rates from the bonbast.com HTML site
//! and crypto symbols from the Wallex market API, and provides the
//! in-memory TTL cache the server stores results in.
//!
//! # Core types
//!
//! - [`PriceQuote`] - a sell/buy pair for one currency on one day
//! - [`ArchiveDay`] - one calendar day of per-currency prices
//! - [`TtlCache`] - time-expiring key/value store for endpoint responses
//! - [`BonbastProvider`] / [`WallexProvider`] - upstream fetch clients

pub mod cache;
pub mod errors;
pub mod html;
pub mod models;
pub mod provider;

pub use cache::TtlCache;
pub use errors::MarketDataError;
pub use models::{ArchiveDay, PriceQuote};
pub use provider::{BonbastProvider, WallexProvider};
