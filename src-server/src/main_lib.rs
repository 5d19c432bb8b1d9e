use std::sync::Arc;
use std::time::Duration;

use nerkh_market_data::{BonbastProvider, TtlCache, WallexProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Shared state injected into every handler and the background poller.
///
/// The cache is one explicit store passed around by reference, never an
/// ambient global: the poller and the endpoints read and write the same
/// entries.
pub struct AppState {
    pub bonbast: BonbastProvider,
    pub wallex: WallexProvider,
    pub cache: TtlCache,
    pub cache_ttl: Duration,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    Arc::new(AppState {
        bonbast: BonbastProvider::new(config.bonbast_url.clone()),
        wallex: WallexProvider::new(config.crypto_url.clone()),
        cache: TtlCache::new(),
        cache_ttl: config.cache_ttl,
    })
}
