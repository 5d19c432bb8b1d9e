//! Wallex crypto market API provider.

use reqwest::Client;
use serde_json::Value;

use crate::errors::MarketDataError;

use super::build_client;

/// Default Wallex markets endpoint.
pub const DEFAULT_MARKETS_URL: &str = "https://api.wallex.ir/v1/markets";

/// Fetch client for the Wallex market-data API.
pub struct WallexProvider {
    client: Client,
    url: String,
}

impl WallexProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            url: url.into(),
        }
    }

    /// Fetches the market symbol list.
    ///
    /// A non-2xx response becomes [`MarketDataError::UpstreamStatus`]
    /// carrying the upstream status code, which the API layer passes
    /// through to the client. On success the `result.symbols` field is
    /// returned unmodified.
    pub async fn symbols(&self) -> Result<Value, MarketDataError> {
        tracing::debug!("Fetching crypto symbols from {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::UpstreamStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body: Value = response.json().await?;
        extract_symbols(body)
    }
}

fn extract_symbols(mut body: Value) -> Result<Value, MarketDataError> {
    body.get_mut("result")
        .and_then(|result| result.get_mut("symbols"))
        .map(Value::take)
        .ok_or_else(|| {
            MarketDataError::UnexpectedPayload("missing result.symbols in markets body".to_string())
        })
}
