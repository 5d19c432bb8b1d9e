//! Domain models for exchange rate data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A sell/buy price pair for one currency.
///
/// Upstream rows only become a `PriceQuote` when both values parse as
/// integers and are strictly positive; anything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub sell: i64,
    pub buy: i64,
}

impl PriceQuote {
    /// Builds a quote from two raw cell values, applying the retention
    /// rule: both must parse as integers and be strictly positive.
    pub fn from_cells(sell: &str, buy: &str) -> Option<Self> {
        let sell: i64 = sell.trim().parse().ok()?;
        let buy: i64 = buy.trim().parse().ok()?;
        if sell > 0 && buy > 0 {
            Some(Self { sell, buy })
        } else {
            None
        }
    }
}

/// One calendar day of per-currency prices from the archive.
///
/// Serializes to the published wire shape, with the date alongside the
/// currency entries:
/// `{"date": "2024-03-01", "usd": {"sell": 61000, "buy": 60900}, ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveDay {
    pub date: String,
    #[serde(flatten)]
    pub prices: BTreeMap<String, PriceQuote>,
}

/// Reads an integer out of a JSON value that may be a number or a
/// numeric string. The latest-quote API reports prices as strings.
pub(crate) fn json_int(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
