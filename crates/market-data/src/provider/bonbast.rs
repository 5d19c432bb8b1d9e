//! Bonbast HTML provider.
//!
//! Three fetch paths, matching the pages the site exposes:
//!
//! - `/historical`: POST `{date, currency}`, one table of
//!   `[date, sell, buy]` rows.
//! - `/archive`: POST `{date}`, several tables of
//!   `[currency, name, sell, buy]` rows; the last table on the page is
//!   navigation, not price data.
//! - latest quotes: the main page embeds a session token in an inline
//!   `$.post('/json', {data:"..."})` call; POSTing that token to `/json`
//!   returns a flat map with `<code>1` (sell) and `<code>2` (buy) entries
//!   per currency.
//!
//! Rows whose sell/buy cells are non-integer or non-positive are skipped
//! silently in all paths.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::html::parse_tables;
use crate::models::{json_int, ArchiveDay, PriceQuote};

use super::build_client;

/// Currency codes the price API reports.
const CURRENCY_CODES: &[&str] = &[
    "usd", "eur", "gbp", "chf", "cad", "aud", "sek", "nok", "rub", "thb", "sgd", "hkd", "azn",
    "amd", "dkk", "aed", "jpy", "try", "cny", "sar", "inr", "myr", "afn", "kwd", "iqd", "bhd",
    "omr", "qar",
];

/// Fetch client for the bonbast.com HTML site.
pub struct BonbastProvider {
    client: Client,
    base_url: String,
}

impl BonbastProvider {
    /// Creates a provider against the given base URL
    /// (e.g. `https://www.bonbast.com`, or a local mock in tests).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POSTs a form to `{base}{path}` and returns the body, failing on
    /// any non-200 status.
    async fn crawl(&self, path: &str, form: &[(&str, String)]) -> Result<String, MarketDataError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Crawling {}", url);
        let response = self.client.post(&url).form(form).send().await?;
        if response.status() != StatusCode::OK {
            return Err(MarketDataError::Crawl { url });
        }
        Ok(response.text().await?)
    }

    /// Fetches the historical series for one currency over one month.
    ///
    /// Returns a map from exact date string to quote, one entry per row
    /// that passed the retention rule.
    pub async fn historical(
        &self,
        currency: &str,
        month: NaiveDate,
    ) -> Result<BTreeMap<String, PriceQuote>, MarketDataError> {
        let date = month.format("%Y-%m-%d").to_string();
        let body = self
            .crawl(
                "/historical",
                &[("date", date), ("currency", currency.to_string())],
            )
            .await?;
        let table = parse_tables(&body)
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::MissingTable {
                url: format!("{}/historical", self.base_url),
            })?;
        Ok(parse_historical_rows(&table))
    }

    /// Fetches the per-currency archive for one day.
    pub async fn archive(&self, date: NaiveDate) -> Result<ArchiveDay, MarketDataError> {
        let date = date.format("%Y-%m-%d").to_string();
        let body = self.crawl("/archive", &[("date", date.clone())]).await?;
        let mut tables = parse_tables(&body);
        // Drop the trailing non-price table; an empty page yields an
        // entry with no currencies, matching the upstream behavior.
        tables.pop();
        let rows: Vec<Vec<String>> = tables.into_iter().flatten().collect();
        Ok(ArchiveDay {
            date,
            prices: parse_archive_rows(&rows),
        })
    }

    /// Fetches the latest quotes via the token-gated price API.
    pub async fn latest(&self) -> Result<BTreeMap<String, PriceQuote>, MarketDataError> {
        let token = self.session_token().await?;
        let url = format!("{}/json", self.base_url);
        let response = self
            .client
            .post(&url)
            .form(&[("data", token.as_str())])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(MarketDataError::Crawl { url });
        }
        let body: Value = response.json().await?;
        parse_price_api_body(&body)
    }

    /// GETs the main page and extracts the session token for `/json`.
    async fn session_token(&self) -> Result<String, MarketDataError> {
        let response = self.client.get(&self.base_url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(MarketDataError::Crawl {
                url: self.base_url.clone(),
            });
        }
        let body = response.text().await?;
        extract_token(&body).ok_or(MarketDataError::TokenNotFound)
    }
}

/// Rows are `[date, sell, buy]`; short or unparsable rows are skipped.
fn parse_historical_rows(rows: &[Vec<String>]) -> BTreeMap<String, PriceQuote> {
    let mut prices = BTreeMap::new();
    for row in rows {
        let [date, sell, buy] = row.as_slice() else {
            continue;
        };
        if let Some(quote) = PriceQuote::from_cells(sell, buy) {
            prices.insert(date.clone(), quote);
        }
    }
    prices
}

/// Rows are `[currency, name, sell, buy]`; currency codes are
/// lower-cased; short or unparsable rows are skipped.
fn parse_archive_rows(rows: &[Vec<String>]) -> BTreeMap<String, PriceQuote> {
    let mut prices = BTreeMap::new();
    for row in rows {
        let [currency, _, sell, buy] = row.as_slice() else {
            continue;
        };
        if let Some(quote) = PriceQuote::from_cells(sell, buy) {
            prices.insert(currency.to_lowercase(), quote);
        }
    }
    prices
}

/// Extracts the `{code: {sell, buy}}` map from the `/json` body.
fn parse_price_api_body(body: &Value) -> Result<BTreeMap<String, PriceQuote>, MarketDataError> {
    let map = body.as_object().ok_or_else(|| {
        MarketDataError::UnexpectedPayload("price API did not return an object".to_string())
    })?;
    let mut prices = BTreeMap::new();
    for code in CURRENCY_CODES {
        let sell = map.get(&format!("{code}1")).and_then(json_int);
        let buy = map.get(&format!("{code}2")).and_then(json_int);
        if let (Some(sell), Some(buy)) = (sell, buy) {
            if sell > 0 && buy > 0 {
                prices.insert(code.to_string(), PriceQuote { sell, buy });
            }
        }
    }
    Ok(prices)
}

/// Finds the session token in the main page's inline `$.post('/json', ...)`.
fn extract_token(html: &str) -> Option<String> {
    let anchor = html.find("$.post('/json'")?;
    let rest = &html[anchor..];
    let start = rest.find("data:\"")? + "data:\"".len();
    let rest = &rest[start..];
    let end = rest.find('"')?;
    if end == 0 {
        return None;
    }
    Some(rest[..end].to_string())
}
