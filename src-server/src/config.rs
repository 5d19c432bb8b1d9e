use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub bonbast_url: String,
    pub crypto_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("NERKH_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .expect("Invalid NERKH_LISTEN_ADDR");
        let bonbast_url = std::env::var("NERKH_BONBAST_URL")
            .unwrap_or_else(|_| "https://www.bonbast.com".into());
        let crypto_url = std::env::var("NERKH_CRYPTO_URL")
            .unwrap_or_else(|_| nerkh_market_data::provider::wallex::DEFAULT_MARKETS_URL.into());
        let cors_allow = std::env::var("NERKH_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("NERKH_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let poll_secs: u64 = std::env::var("NERKH_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .unwrap_or(10);
        let ttl_secs: u64 = std::env::var("NERKH_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .unwrap_or(1800);
        Self {
            listen_addr,
            bonbast_url,
            crypto_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_secs(poll_secs),
            cache_ttl: Duration::from_secs(ttl_secs),
        }
    }
}
