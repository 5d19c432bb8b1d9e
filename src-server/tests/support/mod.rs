//! Shared helpers: local mock upstreams and test configuration.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use nerkh_server::config::Config;

pub const TEST_TOKEN: &str = "dGVzdC10b2tlbg";

/// Per-route upstream hit counters.
#[derive(Clone, Default)]
pub struct Hits {
    pub archive: Arc<AtomicUsize>,
    pub historical: Arc<AtomicUsize>,
    pub json: Arc<AtomicUsize>,
}

/// Serves a bonbast-shaped site on an ephemeral port and returns its
/// base URL plus the hit counters.
pub async fn spawn_bonbast_mock() -> (String, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/", get(main_page))
        .route("/json", post(price_api))
        .route("/historical", post(historical_page))
        .route("/archive", post(archive_page))
        .with_state(hits.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), hits)
}

/// Serves a Wallex-shaped markets endpoint. `fail_with` makes every
/// request fail with that status instead.
pub async fn spawn_wallex_mock(fail_with: Option<StatusCode>) -> String {
    let app = Router::new().route(
        "/v1/markets",
        get(move || async move {
            match fail_with {
                Some(status) => Err((
                    status,
                    Json(serde_json::json!({"message": "upstream down"})),
                )),
                None => Ok(Json(serde_json::json!({
                    "success": true,
                    "result": {"symbols": [
                        {"symbol": "BTCTMN", "baseAsset": "BTC"},
                        {"symbol": "ETHTMN", "baseAsset": "ETH"}
                    ]}
                }))),
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1/markets")
}

pub fn test_config(bonbast_url: String, crypto_url: String) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        bonbast_url,
        crypto_url,
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(20),
        cache_ttl: Duration::from_secs(1800),
    }
}

async fn main_page() -> Html<String> {
    Html(format!(
        r#"<html><body>
        <script>$(function() {{$.post('/json',{{data:"{TEST_TOKEN}"}},function(r){{}});}});</script>
        </body></html>"#
    ))
}

async fn price_api(
    State(hits): State<Hits>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    hits.json.fetch_add(1, Ordering::SeqCst);
    if form.get("data").map(String::as_str) != Some(TEST_TOKEN) {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(serde_json::json!({
        "usd1": "61000", "usd2": "60900",
        "eur1": "66000", "eur2": "65900",
        "gbp1": "0", "gbp2": "77000",
        "azadi1": "42000000", "azadi2": "41000000"
    })))
}

async fn historical_page(State(hits): State<Hits>) -> Html<&'static str> {
    hits.historical.fetch_add(1, Ordering::SeqCst);
    Html(
        r#"<html><body><table>
        <tr><th>Date</th><th>Sell</th><th>Buy</th></tr>
        <tr><td>2024-03-01</td><td>61000</td><td>60900</td></tr>
        <tr><td>2024-03-02</td><td>-</td><td>-</td></tr>
        <tr><td>2024-03-03</td><td>61500</td><td>61400</td></tr>
        </table></body></html>"#,
    )
}

async fn archive_page(State(hits): State<Hits>) -> Html<&'static str> {
    hits.archive.fetch_add(1, Ordering::SeqCst);
    // Two price tables plus a trailing non-price table, like the real
    // archive page.
    Html(
        r#"<html><body>
        <table>
        <tr><th>Code</th><th>Currency</th><th>Sell</th><th>Buy</th></tr>
        <tr><td>USD</td><td>US Dollar</td><td>61000</td><td>60900</td></tr>
        <tr><td>EUR</td><td>Euro</td><td>0</td><td>65900</td></tr>
        </table>
        <table>
        <tr><th>Code</th><th>Currency</th><th>Sell</th><th>Buy</th></tr>
        <tr><td>GBP</td><td>British Pound</td><td>77000</td><td>76900</td></tr>
        </table>
        <table>
        <tr><th>Other pages</th></tr>
        <tr><td>navigation</td></tr>
        </table>
        </body></html>"#,
    )
}
