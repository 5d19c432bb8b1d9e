//! HTTP API layer.
//!
//! Read-only endpoints backed by the shared cache. Every response is
//! cached under a key derived from the route's full argument set
//! (defaults included); a miss computes the value through the upstream
//! providers and stores it for the configured TTL.

use std::{future::Future, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Days, NaiveDate};
use serde::Deserialize;
use serde_json::{Map, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    dates,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    scheduler::{CRYPTO_DATA_KEY, LATEST_DATA_KEY},
};

pub async fn healthz() -> &'static str {
    "ok"
}

/// Explicit memoization wrapper: look up `key`, on a miss run `fetch`
/// and store its result under `key` for the state's TTL.
///
/// No single-flight: concurrent misses for the same key each fetch, and
/// the last writer wins. Values are idempotent upstream snapshots, so
/// that race is harmless.
async fn cached<F, Fut>(state: &AppState, key: String, fetch: F) -> ApiResult<Value>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResult<Value>>,
{
    if let Some(hit) = state.cache.get(&key).await {
        return Ok(hit);
    }
    let value = fetch().await?;
    state.cache.set(&key, value.clone(), state.cache_ttl).await;
    Ok(value)
}

fn to_json<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Anyhow(e.into()))
}

#[derive(Deserialize)]
struct DateQuery {
    date: Option<String>,
}

async fn read_historical(
    Path(currency): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<DateQuery>,
) -> ApiResult<Json<Value>> {
    let month = match q.date.as_deref() {
        Some(raw) => dates::parse_month(raw)?,
        None => dates::current_month(),
    };
    let key = format!("historical:{}:{}", currency, month.format("%Y-%m"));
    let value = cached(&state, key, || async {
        let prices = state.bonbast.historical(&currency, month).await?;
        to_json(&prices)
    })
    .await?;
    Ok(Json(value))
}

/// One day of archive data, through the per-day cache entry. Both
/// `/archive/` and `/archive/range` go through here, so a range request
/// also warms the single-day keys.
async fn archive_day(state: &AppState, day: NaiveDate) -> ApiResult<Value> {
    let key = format!("archive:{}", day.format("%Y-%m-%d"));
    cached(state, key, || async {
        let archive = state.bonbast.archive(day).await?;
        to_json(&archive)
    })
    .await
}

async fn read_archive(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DateQuery>,
) -> ApiResult<Json<Value>> {
    let day = match q.date.as_deref() {
        Some(raw) => dates::parse_day(raw)?,
        None => dates::yesterday(),
    };
    Ok(Json(archive_day(&state, day).await?))
}

#[derive(Deserialize)]
struct RangeQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

async fn read_archive_range(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RangeQuery>,
) -> ApiResult<Json<Value>> {
    let start = match q.start_date.as_deref() {
        Some(raw) => dates::parse_day(raw)?,
        None => {
            return Err(ApiError::UnprocessableEntity(
                "Field required: start_date".to_string(),
            ))
        }
    };
    let end = match q.end_date.as_deref() {
        Some(raw) => dates::parse_day(raw)?,
        None => dates::yesterday(),
    };

    let key = format!("archive_range:{}:{}", start, end);
    let value = cached(&state, key, || async {
        let mut range = Map::new();
        let mut day = start;
        // Inclusive of both endpoints; an end before start yields an
        // empty object.
        while day <= end {
            let entry = archive_day(&state, day).await?;
            let Value::Object(mut prices) = entry else {
                return Err(ApiError::Anyhow(anyhow::anyhow!(
                    "archive entry was not an object"
                )));
            };
            let date = match prices.remove("date") {
                Some(Value::String(date)) => date,
                _ => day.format("%Y-%m-%d").to_string(),
            };
            range.insert(date, Value::Object(prices));
            day = day + Days::new(1);
        }
        Ok(Value::Object(range))
    })
    .await?;
    Ok(Json(value))
}

async fn read_latest(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let value = cached(&state, LATEST_DATA_KEY.to_string(), || async {
        let latest = state.bonbast.latest().await?;
        to_json(&latest)
    })
    .await?;
    Ok(Json(value))
}

async fn read_crypto(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let value = cached(&state, CRYPTO_DATA_KEY.to_string(), || async {
        Ok(state.wallex.symbols().await?)
    })
    .await?;
    Ok(Json(value))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().unwrap())
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/historical/{currency}", get(read_historical))
        .route("/archive/", get(read_archive))
        .route("/archive/range", get(read_archive_range))
        .route("/latest", get(read_latest))
        .route("/crypto", get(read_crypto))
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
